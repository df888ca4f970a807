//! cfg 模块 - 组件配置
//!
//! 通过 `TypeOptions` + Trait 注册表，按配置动态创建组件（例如日志输出器）

#[macro_use]
mod macros;
pub mod registry;
pub mod type_options;

// 重新导出公共 API
pub use registry::{create_trait_from_type_options, register_trait};
pub use type_options::TypeOptions;
