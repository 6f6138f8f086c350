pub mod codegen;
pub mod error;
pub mod ir;
pub mod mapper;
pub mod model;
pub mod parse;
pub mod settings;
