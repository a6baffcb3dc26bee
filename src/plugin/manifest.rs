//! 插件清单与延迟字段
//!
//! 清单字段既可以是字面量，也可以是注册时才求值的解析器（同步或异步闭包）。
//! 解析在注册时各执行一次，注册完成后宿主只看到字面量。

use std::fmt;

use futures::future::BoxFuture;
use std::future::Future;

use super::types::{PluginError, ResolvedManifest};

/// 可延迟解析的清单字段
///
/// 解析消耗自身，类型层面保证每个字段只解析一次。
pub enum ResolvableField<T> {
    /// 字面量
    Literal(T),
    /// 同步解析器
    Resolver(Box<dyn FnOnce() -> anyhow::Result<T> + Send>),
    /// 异步解析器
    AsyncResolver(Box<dyn FnOnce() -> BoxFuture<'static, anyhow::Result<T>> + Send>),
}

impl<T> ResolvableField<T> {
    /// 创建字面量字段
    pub fn literal(value: impl Into<T>) -> Self {
        ResolvableField::Literal(value.into())
    }

    /// 用同步闭包创建解析器字段
    pub fn resolver<F>(f: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    {
        ResolvableField::Resolver(Box::new(f))
    }

    /// 用异步闭包创建解析器字段
    pub fn async_resolver<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        ResolvableField::AsyncResolver(Box::new(move || Box::pin(f())))
    }

    /// 解析出字面量
    ///
    /// 字面量原样返回；解析器调用一次，异步解析器等待完成。
    /// 解析器内部的错误原样向调用方（清单注册流程）传播。
    pub async fn resolve(self) -> anyhow::Result<T> {
        match self {
            ResolvableField::Literal(value) => Ok(value),
            ResolvableField::Resolver(f) => f(),
            ResolvableField::AsyncResolver(f) => f().await,
        }
    }
}

impl<T> From<T> for ResolvableField<T> {
    fn from(value: T) -> Self {
        ResolvableField::Literal(value)
    }
}

impl From<&str> for ResolvableField<String> {
    fn from(value: &str) -> Self {
        ResolvableField::Literal(value.to_string())
    }
}

impl From<Vec<&str>> for ResolvableField<Vec<String>> {
    fn from(values: Vec<&str>) -> Self {
        ResolvableField::Literal(values.into_iter().map(str::to_string).collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for ResolvableField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvableField::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            ResolvableField::Resolver(_) => f.write_str("Resolver(..)"),
            ResolvableField::AsyncResolver(_) => f.write_str("AsyncResolver(..)"),
        }
    }
}

/// 插件声明的清单
///
/// 由插件作者构造，注册时被消耗；之后只有解析后的副本留在宿主侧。
#[derive(Debug)]
pub struct PluginManifest {
    /// 包名称
    pub name: ResolvableField<String>,
    /// 可安装版本列表
    pub available_version: ResolvableField<Vec<String>>,
}

impl PluginManifest {
    /// 创建清单
    pub fn new(
        name: impl Into<ResolvableField<String>>,
        available_version: impl Into<ResolvableField<Vec<String>>>,
    ) -> Self {
        Self {
            name: name.into(),
            available_version: available_version.into(),
        }
    }

    /// 解析全部字段
    ///
    /// 任一字段解析失败则整体失败，调用方不会拿到半解析的清单。
    pub async fn resolve(self) -> Result<ResolvedManifest, PluginError> {
        let name = self
            .name
            .resolve()
            .await
            .map_err(|e| PluginError::Resolution {
                field: "name".to_string(),
                message: e.to_string(),
            })?;
        let available_version =
            self.available_version
                .resolve()
                .await
                .map_err(|e| PluginError::Resolution {
                    field: "available_version".to_string(),
                    message: e.to_string(),
                })?;
        Ok(ResolvedManifest {
            name,
            available_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[tokio::test]
    async fn test_literal_resolves_unchanged() {
        let field: ResolvableField<String> = "PHP".into();
        assert_eq!(field.resolve().await.unwrap(), "PHP");
    }

    #[tokio::test]
    async fn test_sync_resolver_returns_value_not_closure() {
        let field = ResolvableField::resolver(|| Ok(vec!["7.4".to_string(), "8.0".to_string()]));
        assert_eq!(
            field.resolve().await.unwrap(),
            vec!["7.4".to_string(), "8.0".to_string()]
        );
    }

    #[tokio::test]
    async fn test_async_resolver_is_awaited() {
        let field = ResolvableField::async_resolver(|| async {
            tokio::task::yield_now().await;
            Ok("PHP".to_string())
        });
        assert_eq!(field.resolve().await.unwrap(), "PHP");
    }

    #[tokio::test]
    async fn test_resolver_error_propagates() {
        let field: ResolvableField<String> =
            ResolvableField::resolver(|| anyhow::bail!("源不可用"));
        assert!(field.resolve().await.is_err());
    }

    #[tokio::test]
    async fn test_manifest_mixed_fields() {
        let manifest = PluginManifest::new(
            "PHP",
            ResolvableField::resolver(|| Ok(vec!["7.4".to_string(), "8.0".to_string()])),
        );
        let resolved = manifest.resolve().await.unwrap();
        assert_eq!(resolved.name, "PHP");
        assert_eq!(resolved.available_version, vec!["7.4", "8.0"]);
    }

    #[tokio::test]
    async fn test_manifest_resolution_failure_names_field() {
        let manifest = PluginManifest::new(
            "PHP",
            ResolvableField::<Vec<String>>::resolver(|| anyhow::bail!("版本源超时")),
        );
        match manifest.resolve().await {
            Err(crate::plugin::PluginError::Resolution { field, message }) => {
                assert_eq!(field, "available_version");
                assert!(message.contains("版本源超时"));
            }
            other => panic!("意外结果: {:?}", other.map(|_| ())),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// *对于任意*全字面量清单，解析结果与输入逐字段相等。
        #[test]
        fn literal_manifest_resolves_identically(
            name in "[a-zA-Z0-9_-]{1,20}",
            versions in prop::collection::vec("[0-9]{1,2}\\.[0-9]{1,2}", 1..5),
        ) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            let resolved = rt
                .block_on(PluginManifest::new(name.clone(), versions.clone()).resolve())
                .unwrap();
            prop_assert_eq!(resolved.name, name);
            prop_assert_eq!(resolved.available_version, versions);
        }
    }
}
