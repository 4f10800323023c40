use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 标记文档的扩展名
const MARKUP_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// 一个待处理的标记文档
#[derive(Debug, Clone)]
pub struct MarkupDocument {
    /// 文件名（不含扩展名）
    pub name: String,
    pub path: PathBuf,
    pub text: String,
}

/// 加载结果
#[derive(Debug, Clone)]
pub struct LoadedDocuments {
    pub documents: Vec<MarkupDocument>,
    /// 输入是否为文件夹
    pub from_folder: bool,
}

fn is_markup_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| MARKUP_EXTENSIONS.contains(&ext))
}

/// 从文件加载标记文档
pub async fn load_markup_document(path: &Path) -> Result<MarkupDocument> {
    let text = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取标记文件: {}", path.display()))?;

    let name = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(MarkupDocument {
        name,
        path: path.to_path_buf(),
        text,
    })
}

/// 从文件夹中加载所有标记文档（不递归，按文件名排序）
pub async fn load_all_markup_files(folder_path: &Path) -> Result<Vec<MarkupDocument>> {
    if !folder_path.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path.display());
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(folder_path)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if is_markup_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::new();
    for path in paths {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_markup_document(&path).await {
            Ok(document) => documents.push(document),
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(documents)
}

/// 按输入路径加载：文件夹加载其中全部文档，文件只加载自身
pub async fn load_documents(input_path: &Path) -> Result<LoadedDocuments> {
    let metadata = fs::metadata(input_path)
        .await
        .with_context(|| format!("输入路径不存在: {}", input_path.display()))?;

    if metadata.is_dir() {
        Ok(LoadedDocuments {
            documents: load_all_markup_files(input_path).await?,
            from_folder: true,
        })
    } else {
        Ok(LoadedDocuments {
            documents: vec![load_markup_document(input_path).await?],
            from_folder: false,
        })
    }
}
