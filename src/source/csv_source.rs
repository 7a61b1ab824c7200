// ==========================================
// 产线质检与装箱系统 - CSV 来源
// ==========================================
// 阶段 1: 文件读取与解析（表头 → 行 map）
// 阶段 2: 字段映射（列名别名 → RawPieceRecord）
// 说明: 数值不在此解析,由质检准入逐件校验
// ==========================================

use crate::domain::piece::{Piece, RawPieceRecord};
use crate::source::error::{SourceError, SourceResult};
use csv::{ReaderBuilder, Writer};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 标准列名（写出时使用）
pub const CSV_HEADER: [&str; 4] = ["id", "weight", "color", "length"];

/// 列名别名
fn aliases(field: &str) -> &'static [&'static str] {
    match field {
        "id" => &["id", "piece_id", "编号"],
        "weight" => &["weight", "weight_g", "peso", "重量"],
        "color" => &["color", "colour", "cor", "颜色"],
        "length" => &["length", "length_cm", "comprimento", "长度"],
        _ => &[],
    }
}

// ==========================================
// 读取
// ==========================================

/// 从 CSV 文件读取源记录
pub fn read_pieces_csv(path: &Path) -> SourceResult<Vec<RawPieceRecord>> {
    // 检查文件存在
    if !path.exists() {
        return Err(SourceError::FileNotFound(path.display().to_string()));
    }

    // 检查扩展名
    if let Some(ext) = path.extension() {
        if ext != "csv" {
            return Err(SourceError::UnsupportedFormat(
                ext.to_string_lossy().to_string(),
            ));
        }
    }

    let file = File::open(path)?;
    let records = read_pieces_from_reader(file)?;

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "CSV 源记录读取完成"
    );
    Ok(records)
}

/// 从任意输入流读取源记录
pub fn read_pieces_from_reader<R: Read>(input: R) -> SourceResult<Vec<RawPieceRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许行长度不一致
        .from_reader(input);

    // 读取表头
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    for field in CSV_HEADER {
        if !aliases(field).iter().any(|a| headers.iter().any(|h| h == a)) {
            return Err(SourceError::MissingColumn(field.to_string()));
        }
    }

    let mut records = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let mut row_map = HashMap::new();

        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.clone(), value.trim().to_string());
            }
        }

        // 跳过完全空白的行
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }

        // 表头占第 1 行
        records.push(map_row(&row_map, row_idx + 2));
    }

    Ok(records)
}

/// 行 map → 源记录
fn map_row(row: &HashMap<String, String>, row_number: usize) -> RawPieceRecord {
    RawPieceRecord {
        id: get_string(row, "id"),
        weight: get_string(row, "weight"),
        color: get_string(row, "color"),
        length: get_string(row, "length"),
        row_number,
    }
}

/// 提取字段,空值视为缺失
fn get_string(row: &HashMap<String, String>, field: &str) -> Option<String> {
    for alias in aliases(field) {
        if let Some(v) = row.get(*alias) {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

// ==========================================
// 写出
// ==========================================

/// 将工件写为 CSV（重量/长度保留三位小数）
pub fn write_pieces_csv<I>(path: &Path, pieces: I) -> SourceResult<usize>
where
    I: IntoIterator<Item = Piece>,
{
    let file = File::create(path).map_err(|e| SourceError::FileWriteError(e.to_string()))?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(CSV_HEADER)?;

    let mut written = 0;
    for piece in pieces {
        writer.write_record(&[
            piece.id.to_string(),
            format!("{:.3}", piece.weight),
            piece.color,
            format!("{:.3}", piece.length),
        ])?;
        written += 1;
    }

    writer
        .flush()
        .map_err(|e| SourceError::FileWriteError(e.to_string()))?;

    tracing::info!(path = %path.display(), written, "CSV 工件文件写出完成");
    Ok(written)
}
