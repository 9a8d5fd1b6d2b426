pub mod error;
pub mod format;
pub mod memory;
pub mod quality;
pub mod traits;
pub mod types;

pub use error::*;
pub use memory::MemoryRegion;
pub use quality::{has_series_data, is_chart_data_usable};
pub use traits::*;
pub use types::*;
