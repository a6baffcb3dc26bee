//! 插件上下文
//!
//! 宿主为每个插件创建一个上下文，插件加载时通过它完成两类注册：
//! 清单注册（含延迟字段解析）和安装器注册。之后宿主通过同一上下文
//! 发起安装调用。

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::installer::Installer;
use super::manifest::PluginManifest;
use super::types::{PluginError, RegisteredManifest, ResolvedManifest};
use crate::host_env::HostEnv;

/// 插件上下文 - 宿主持有的注册入口
pub struct PluginContext {
    /// 宿主环境描述符（只读共享）
    env: Arc<HostEnv>,
    /// 注册后的清单快照
    manifest: Option<RegisteredManifest>,
    /// 注册后的安装器
    installer: Option<Arc<dyn Installer>>,
}

impl PluginContext {
    /// 创建新的上下文
    pub fn new(env: Arc<HostEnv>) -> Self {
        Self {
            env,
            manifest: None,
            installer: None,
        }
    }

    /// 宿主环境描述符
    pub fn env(&self) -> &HostEnv {
        &self.env
    }

    /// 注册插件清单
    ///
    /// 解析清单全部字段后存入宿主侧快照。任一字段解析失败或清单
    /// 无效时整体失败，不会留下部分注册的状态。重复注册报错。
    pub async fn register_manifest(&mut self, manifest: PluginManifest) -> Result<(), PluginError> {
        if let Some(existing) = &self.manifest {
            return Err(PluginError::AlreadyRegistered(
                existing.manifest.name.clone(),
            ));
        }

        let resolved = manifest.resolve().await?;
        resolved.validate()?;

        info!(
            "注册清单: {} ({} 个版本)",
            resolved.name,
            resolved.available_version.len()
        );
        self.manifest = Some(RegisteredManifest::new(resolved));
        Ok(())
    }

    /// 注册安装器
    ///
    /// 每次插件加载注册一次，重复注册报错。
    pub fn register_installer(&mut self, installer: Arc<dyn Installer>) -> Result<(), PluginError> {
        if self.installer.is_some() {
            let name = self
                .manifest
                .as_ref()
                .map(|m| m.manifest.name.clone())
                .unwrap_or_default();
            return Err(PluginError::AlreadyRegistered(name));
        }
        self.installer = Some(installer);
        Ok(())
    }

    /// 注册后的清单快照
    pub fn manifest(&self) -> Option<&ResolvedManifest> {
        self.manifest.as_ref().map(|m| &m.manifest)
    }

    /// 注册条目（含注册时间）
    pub fn registered_manifest(&self) -> Option<&RegisteredManifest> {
        self.manifest.as_ref()
    }

    /// 清单与安装器是否都已注册
    ///
    /// 两者齐备之前宿主不把插件视为可安装。
    pub fn is_installable(&self) -> bool {
        self.manifest.is_some() && self.installer.is_some()
    }

    /// 发起一次安装调用
    ///
    /// 每次调用相互独立；安装器内部的错误原样向宿主传播。
    pub async fn install(&self, version: &str, target_dir: &Path) -> Result<bool, PluginError> {
        if self.manifest.is_none() {
            return Err(PluginError::ManifestNotRegistered);
        }
        let installer = self
            .installer
            .as_ref()
            .ok_or(PluginError::InstallerNotRegistered)?;

        installer.install(&self.env, version, target_dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::manifest::ResolvableField;

    fn test_env() -> Arc<HostEnv> {
        Arc::new(HostEnv {
            app_version: "0.3.0".to_string(),
            git_hash: "abc1234".to_string(),
            target_os: "linux".to_string(),
            target_arch: "x86_64".to_string(),
            target_family: "unix".to_string(),
            target_env: "gnu".to_string(),
            profile: "debug".to_string(),
        })
    }

    #[tokio::test]
    async fn test_register_literal_manifest_unchanged() {
        let mut ctx = PluginContext::new(test_env());
        ctx.register_manifest(PluginManifest::new("PHP", vec!["7.4", "8.0"]))
            .await
            .unwrap();

        let manifest = ctx.manifest().unwrap();
        assert_eq!(manifest.name, "PHP");
        assert_eq!(manifest.available_version, vec!["7.4", "8.0"]);
    }

    #[tokio::test]
    async fn test_register_resolver_manifest_stores_values() {
        let mut ctx = PluginContext::new(test_env());
        ctx.register_manifest(PluginManifest::new(
            "PHP",
            ResolvableField::resolver(|| Ok(vec!["7.4".to_string(), "8.0".to_string()])),
        ))
        .await
        .unwrap();

        let manifest = ctx.manifest().unwrap();
        assert_eq!(manifest.available_version, vec!["7.4", "8.0"]);
    }

    #[tokio::test]
    async fn test_failed_resolution_registers_nothing() {
        let mut ctx = PluginContext::new(test_env());
        let result = ctx
            .register_manifest(PluginManifest::new(
                ResolvableField::<String>::resolver(|| anyhow::bail!("名称源不可用")),
                vec!["7.4"],
            ))
            .await;

        assert!(matches!(result, Err(PluginError::Resolution { .. })));
        assert!(ctx.manifest().is_none());
        assert!(!ctx.is_installable());
    }

    #[tokio::test]
    async fn test_double_registration_rejected() {
        let mut ctx = PluginContext::new(test_env());
        ctx.register_manifest(PluginManifest::new("PHP", vec!["7.4"]))
            .await
            .unwrap();
        let result = ctx
            .register_manifest(PluginManifest::new("PHP", vec!["8.0"]))
            .await;
        assert!(matches!(result, Err(PluginError::AlreadyRegistered(_))));
        // 原注册不受影响
        assert_eq!(ctx.manifest().unwrap().available_version, vec!["7.4"]);
    }

    #[tokio::test]
    async fn test_install_requires_both_registrations() {
        let mut ctx = PluginContext::new(test_env());
        let result = ctx.install("7.4", Path::new("/tmp/out")).await;
        assert!(matches!(result, Err(PluginError::ManifestNotRegistered)));

        // 只注册清单仍不可安装
        ctx.register_manifest(PluginManifest::new("PHP", vec!["7.4"]))
            .await
            .unwrap();
        assert!(!ctx.is_installable());
        let result = ctx.install("7.4", Path::new("/tmp/out")).await;
        assert!(matches!(result, Err(PluginError::InstallerNotRegistered)));
    }
}
