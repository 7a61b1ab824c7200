// ==========================================
// 产线质检与装箱系统 - 运行报告
// ==========================================
// 职责: 汇总运行元信息 + 只读快照,支持 JSON 导出
// ==========================================

use crate::domain::run_state::RunSnapshot;
use crate::engine::orchestrator::{RunOutcome, SkippedPiece};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub snapshot: RunSnapshot,
    #[serde(default)]
    pub skipped: Vec<SkippedPiece>,
}

impl RunReport {
    pub fn from_outcome(outcome: &RunOutcome) -> Self {
        Self {
            run_id: outcome.run_id,
            started_at: outcome.started_at,
            finished_at: outcome.finished_at,
            snapshot: outcome.snapshot(),
            skipped: outcome.skipped.clone(),
        }
    }

    /// 运行耗时（毫秒）
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
