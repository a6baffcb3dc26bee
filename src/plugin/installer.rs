//! 安装器契约
//!
//! 定义 Installer trait 以及各安装器共用的校验助手。
//! 约定：先校验版本与平台（不做任何 IO），再确保目标目录存在，
//! 之后才允许下载/解压，完全成功才返回 `true`。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tokio::fs;

use super::types::PluginError;
use crate::host_env::HostEnv;

/// 安装器 trait - 每个插件注册一个实现
///
/// 宿主可以对同一实现发起任意多次独立调用，实现之间不共享可变状态。
#[async_trait]
pub trait Installer: Send + Sync {
    /// 执行一次安装
    ///
    /// 返回 `true` 表示安装完整成功；任何部分失败必须以错误或 `false` 上报。
    async fn install(
        &self,
        env: &HostEnv,
        version: &str,
        target_dir: &Path,
    ) -> Result<bool, PluginError>;
}

/// 函数安装器 - 把异步闭包包装为 Installer
pub struct FnInstaller<F>
where
    F: Fn(HostEnv, String, PathBuf) -> BoxFuture<'static, Result<bool, PluginError>>
        + Send
        + Sync,
{
    callback: F,
}

impl<F> FnInstaller<F>
where
    F: Fn(HostEnv, String, PathBuf) -> BoxFuture<'static, Result<bool, PluginError>>
        + Send
        + Sync,
{
    /// 创建新的函数安装器
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

#[async_trait]
impl<F> Installer for FnInstaller<F>
where
    F: Fn(HostEnv, String, PathBuf) -> BoxFuture<'static, Result<bool, PluginError>>
        + Send
        + Sync,
{
    async fn install(
        &self,
        env: &HostEnv,
        version: &str,
        target_dir: &Path,
    ) -> Result<bool, PluginError> {
        (self.callback)(env.clone(), version.to_string(), target_dir.to_path_buf()).await
    }
}

/// 安装器支持的平台集合
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformSupport {
    /// 支持的平台族 (如 "unix")
    pub families: Vec<String>,
    /// 支持的 CPU 架构 (如 "x86_64")
    pub arches: Vec<String>,
}

impl PlatformSupport {
    /// 创建平台支持声明
    pub fn new(
        families: impl IntoIterator<Item = impl Into<String>>,
        arches: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            families: families.into_iter().map(Into::into).collect(),
            arches: arches.into_iter().map(Into::into).collect(),
        }
    }

    /// 判断宿主环境是否在支持范围内
    pub fn supports(&self, env: &HostEnv) -> bool {
        self.families.iter().any(|f| *f == env.target_family)
            && self.arches.iter().any(|a| *a == env.target_arch)
    }

    /// 校验宿主环境，不支持则报 UnsupportedPlatform
    pub fn ensure(&self, env: &HostEnv) -> Result<(), PluginError> {
        if self.supports(env) {
            Ok(())
        } else {
            Err(PluginError::UnsupportedPlatform {
                family: env.target_family.clone(),
                arch: env.target_arch.clone(),
            })
        }
    }
}

/// 校验请求的版本在支持集合内
///
/// 不在集合内直接报错，绝不替换为其它版本。
pub fn ensure_version_supported(supported: &[String], requested: &str) -> Result<(), PluginError> {
    if supported.iter().any(|v| v == requested) {
        Ok(())
    } else {
        Err(PluginError::UnsupportedVersion(requested.to_string()))
    }
}

/// 确保目标目录存在（递归创建）
pub async fn ensure_target_dir(dir: &Path) -> Result<(), PluginError> {
    fs::create_dir_all(dir).await?;
    Ok(())
}
