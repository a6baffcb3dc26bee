//! 单文件下载器
//!
//! 安装器回调通过它拉取发行包：校验 URL 协议、分类失败响应、
//! 把响应体流式写入目标文件。

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// 下载错误类型
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("无效的下载地址: {0}, 仅支持 http:// 或 https://")]
    InvalidScheme(String),

    #[error("请求的地址不存在: {0}")]
    NotFound(String),

    #[error("下载失败: HTTP {0}")]
    HttpStatus(u16),

    #[error("下载地址 {0} 未返回文件内容")]
    EmptyBody(String),

    #[error("网络错误: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 单文件下载器
pub struct FileDownloader {
    client: Client,
}

impl FileDownloader {
    /// 创建新的下载器
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(300))
                .user_agent("PackCast")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// 下载单个文件到目标路径
    ///
    /// 目标文件整体覆盖写入。先写入同目录的 `.part` 临时文件，
    /// 流式写完后再改名到目标路径，失败不留下半截的目标文件。
    pub async fn download_file(&self, src: &str, dest: &Path) -> Result<(), DownloadError> {
        if !(src.starts_with("http://") || src.starts_with("https://")) {
            return Err(DownloadError::InvalidScheme(src.to_string()));
        }

        info!("开始下载: {} -> {:?}", src, dest);

        let response = self.client.get(src).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DownloadError::NotFound(src.to_string()));
        }
        if !status.is_success() {
            return Err(DownloadError::HttpStatus(status.as_u16()));
        }
        if response.content_length() == Some(0) {
            return Err(DownloadError::EmptyBody(src.to_string()));
        }

        // 确保目标目录存在
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let part_path = part_path(dest);
        match self.stream_to_file(response, &part_path).await {
            Ok(()) => {
                fs::rename(&part_path, dest).await?;
                info!("下载完成: {:?}", dest);
                Ok(())
            }
            Err(e) => {
                warn!("下载中断: {} - {}", src, e);
                let _ = fs::remove_file(&part_path).await;
                Err(e)
            }
        }
    }

    async fn stream_to_file(
        &self,
        response: reqwest::Response,
        path: &Path,
    ) -> Result<(), DownloadError> {
        let mut file = fs::File::create(path).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        Ok(())
    }
}

impl Default for FileDownloader {
    fn default() -> Self {
        Self::new()
    }
}

/// 同目录下的临时文件路径: `<文件名>.part`
fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

/// 缺省安装根目录: `<配置目录>/packcast/packages`
pub fn default_install_root() -> Result<PathBuf, std::io::Error> {
    dirs::config_dir()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "无法获取配置目录"))
        .map(|p| p.join("packcast").join("packages"))
}
