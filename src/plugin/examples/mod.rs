//! 示例插件

pub mod php_runtime;
