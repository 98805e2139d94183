pub mod manager;
pub mod splitting;
pub mod traits;
pub mod windows;

pub use manager::{AppConfig, ConfigManager};
pub use splitting::SplitSection;
pub use traits::ConfigSection;
pub use windows::WindowSection;
