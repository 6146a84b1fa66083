pub mod date_deserialization_ops;
pub mod fs;
pub mod trip_reader;
