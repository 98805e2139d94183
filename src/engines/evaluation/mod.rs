pub mod instances;
pub mod template;

pub use instances::{
    InsufficientDataPolicy, Projection, TestData, TestInstance, TestInstances, WindowParams,
};
pub use template::{TemplateRecord, TestTemplate};
