//! 宿主环境描述符
//!
//! 在进程启动时构建一次，描述宿主版本与目标平台信息。
//! 只读数据：通过 `PluginContext` 注入插件代码，安装器据此做平台校验。

use serde::{Deserialize, Serialize};

/// 宿主环境描述符
///
/// 所有字段在构建后不再变更。测试可以直接用字段字面量构造合成环境。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEnv {
    /// 宿主版本号
    pub app_version: String,
    /// 构建时的 git 提交号
    pub git_hash: String,
    /// 目标操作系统 (如 "linux", "macos", "windows")
    pub target_os: String,
    /// 目标 CPU 架构 (如 "x86_64", "aarch64")
    pub target_arch: String,
    /// 目标平台族 (如 "unix", "windows")
    pub target_family: String,
    /// 目标 C 运行时 (如 "gnu", "musl", "msvc")
    pub target_env: String,
    /// 构建配置 ("debug" 或 "release")
    pub profile: String,
}

impl HostEnv {
    /// 构建当前进程的真实环境描述符
    pub fn current() -> Self {
        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            git_hash: option_env!("PACKCAST_GIT_HASH")
                .unwrap_or("unknown")
                .to_string(),
            target_os: std::env::consts::OS.to_string(),
            target_arch: std::env::consts::ARCH.to_string(),
            target_family: std::env::consts::FAMILY.to_string(),
            target_env: target_env_name().to_string(),
            profile: if cfg!(debug_assertions) {
                "debug".to_string()
            } else {
                "release".to_string()
            },
        }
    }

    /// 当前平台标识 (如 "linux-x64")
    pub fn platform_key(&self) -> String {
        let arch = match self.target_arch.as_str() {
            "x86_64" => "x64",
            "aarch64" => "arm64",
            other => other,
        };
        format!("{}-{}", self.target_os, arch)
    }
}

fn target_env_name() -> &'static str {
    if cfg!(target_env = "gnu") {
        "gnu"
    } else if cfg!(target_env = "musl") {
        "musl"
    } else if cfg!(target_env = "msvc") {
        "msvc"
    } else {
        ""
    }
}
