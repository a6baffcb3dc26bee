//! PackCast - 安装器宿主的插件 SDK
//!
//! 插件声明可安装包的清单（字段可延迟解析）并注册安装器回调；
//! 宿主注入环境描述符，并在需要时带具体版本与目标目录调用安装器。

pub mod host_env;
pub mod logger;
pub mod plugin;

pub use host_env::HostEnv;
pub use plugin::{
    DownloadError, FileDownloader, FnInstaller, Installer, PlatformSupport, PluginContext,
    PluginError, PluginManifest, RegisteredManifest, ResolvableField, ResolvedManifest,
};
