// ==========================================
// 产线质检与装箱系统 - 来源模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 来源模块错误类型
#[derive(Error, Debug)]
pub enum SourceError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("文件写入失败: {0}")]
    FileWriteError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 表头错误 =====
    #[error("缺少必需列: {0}")]
    MissingColumn(String),
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for SourceError {
    fn from(err: csv::Error) -> Self {
        SourceError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type SourceResult<T> = Result<T, SourceError>;
