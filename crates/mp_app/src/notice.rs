use thiserror::Error;

/// Message shown to the user when an action cannot complete. Session state is
/// left as it was before the action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    #[error("Please set your API_KEY in the environment or ensure the app is configured correctly.")]
    MissingCredential,

    #[error("AI Processing Failed. Please try again.")]
    FormatFailed,

    #[error("未能生成图片，请重试。")]
    ImageEmpty,

    #[error("生成失败，请检查网络或 API Key。")]
    ImageFailed,

    #[error("写作失败，请稍后重试。")]
    WriteFailed,

    #[error("请输入文章主题")]
    TopicMissing,

    #[error("自动复制失败。请手动全选右侧预览区域内容进行复制 (Ctrl+A, Ctrl+C)。")]
    CopyFailed,

    #[error("{0} is already in progress")]
    Busy(&'static str),

    #[error("History entry '{0}' not found")]
    EntryNotFound(String),

    #[error("Unknown theme '{0}'")]
    UnknownTheme(String),
}
