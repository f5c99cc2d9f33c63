pub mod person_mapper;

pub use person_mapper::PersonMapper;
