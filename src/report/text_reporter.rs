// ==========================================
// 产线质检与装箱系统 - 文本报告渲染
// ==========================================
// 职责: 将运行报告渲染为可读文本（中/英）
// 装箱展示规则:
// - current_box_fill == 0 且 boxes_used > 1 → "已装满 N-1 箱,最后一箱未开始"
// - 否则 → "使用 N 箱,最后一箱 k / 容量"
// ==========================================

use crate::domain::run_state::BoxOccupancy;
use crate::domain::types::ReasonTag;
use crate::i18n::{t_in, t_with_args_in};
use crate::report::run_report::RunReport;

const RULE_WIDTH: usize = 40;

pub struct TextReporter {
    locale: String,
}

impl TextReporter {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    pub fn render(&self, report: &RunReport) -> String {
        let snapshot = &report.snapshot;
        let rule = "=".repeat(RULE_WIDTH);
        let mut lines = Vec::new();

        lines.push(rule.clone());
        lines.push(format!("    {}", self.t("report.title")));
        lines.push(rule.clone());
        lines.push(self.t_args("report.run_id", &[("id", report.run_id.to_string())]));
        lines.push(String::new());

        // 合格/不合格
        lines.push(self.t_args(
            "report.accepted_total",
            &[("count", snapshot.accepted_total.to_string())],
        ));
        lines.push(self.t_args(
            "report.rejected_total",
            &[("count", snapshot.rejected_total.to_string())],
        ));
        if !report.skipped.is_empty() {
            lines.push(self.t_args(
                "report.skipped_total",
                &[("count", report.skipped.len().to_string())],
            ));
        }
        lines.push(String::new());

        // 不合格原因
        lines.push(self.t("report.reasons_header"));
        if snapshot.rejected_total == 0 {
            lines.push(self.t("report.no_rejections"));
        } else {
            for tag in ReasonTag::ALL {
                lines.push(self.t_args(
                    "report.reason_line",
                    &[
                        ("reason", self.t(tag.i18n_key())),
                        ("count", snapshot.reason_count(tag).to_string()),
                    ],
                ));
            }
        }
        lines.push(String::new());

        // 装箱
        lines.push(self.t("report.boxes_header"));
        if !snapshot.last_box_started() && snapshot.boxes_used > 1 {
            lines.push(self.t_args(
                "report.boxes_complete",
                &[("count", snapshot.completed_boxes().to_string())],
            ));
            lines.push(self.t("report.last_box_not_started"));
        } else {
            lines.push(self.t_args(
                "report.boxes_total",
                &[("count", snapshot.boxes_used.to_string())],
            ));
            lines.push(self.t_args(
                "report.last_box_fill",
                &[
                    ("box", snapshot.boxes_used.to_string()),
                    ("fill", snapshot.current_box_fill.to_string()),
                    ("capacity", snapshot.box_capacity.to_string()),
                ],
            ));
        }
        lines.push(rule);

        lines.join("\n")
    }

    fn t(&self, key: &str) -> String {
        t_in(&self.locale, key)
    }

    fn t_args(&self, key: &str, args: &[(&str, String)]) -> String {
        let args: Vec<(&str, &str)> = args.iter().map(|(k, v)| (*k, v.as_str())).collect();
        t_with_args_in(&self.locale, key, &args)
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new("zh-CN")
    }
}
