// ==========================================
// 产线质检与装箱系统 - 产线编排器
// ==========================================
// 用途: 协调 质检 → 装箱/原因统计 的执行顺序
// 红线: 单线程、逐件、按到达顺序,不重排
// 红线: 一件工件要么完整处理,要么完全不处理
// ==========================================

use crate::config::{ConfigResult, LineConfig};
use crate::domain::inspection::InspectionResult;
use crate::domain::piece::{Piece, RawPieceRecord};
use crate::domain::run_state::{RunSnapshot, RunState};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::events::{BoxClosedEvent, OptionalEventPublisher};
use crate::engine::{Aggregator, Inspector, Packer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

// ==========================================
// 不合规记录处理策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MalformedPolicy {
    #[default]
    Skip,  // 记录日志并跳过该件
    Abort, // 中止整次运行
}

/// 被跳过的源记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedPiece {
    pub row_number: usize,
    pub piece_id: Option<String>,
    pub error: String,
}

/// 单件处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum PieceOutcome {
    Processed {
        inspection: InspectionResult,
        box_closed: Option<BoxClosedEvent>,
    },
    Skipped(SkippedPiece),
}

// ==========================================
// RunOutcome - 运行结果
// ==========================================
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub state: RunState,
    pub box_capacity: u32,
    pub skipped: Vec<SkippedPiece>,
}

impl RunOutcome {
    pub fn snapshot(&self) -> RunSnapshot {
        self.state.snapshot(self.box_capacity)
    }
}

// ==========================================
// LineOrchestrator - 产线编排器
// ==========================================
pub struct LineOrchestrator {
    inspector: Inspector,
    packer: Packer,
    aggregator: Aggregator,
    publisher: OptionalEventPublisher,
    policy: MalformedPolicy,
}

impl LineOrchestrator {
    /// 校验配置后创建编排器
    ///
    /// # 错误
    /// - 配置校验失败（区间倒置、颜色为空、箱容量为 0 等）
    pub fn try_new(config: Arc<LineConfig>) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 产线配置（调用方保证已校验; 未校验时箱容量 0 按 1 处理）
    pub fn new(config: Arc<LineConfig>) -> Self {
        Self {
            packer: Packer::new(config.box_capacity),
            inspector: Inspector::new(config),
            aggregator: Aggregator::new(),
            publisher: OptionalEventPublisher::none(),
            policy: MalformedPolicy::default(),
        }
    }

    /// 设置封箱事件发布者
    pub fn with_publisher(mut self, publisher: OptionalEventPublisher) -> Self {
        self.publisher = publisher;
        self
    }

    /// 设置不合规记录处理策略
    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 替换原因统计引擎
    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// 实际生效的箱容量
    pub fn box_capacity(&self) -> u32 {
        self.packer.capacity()
    }

    /// 开始一次运行（逐件驱动,适用于外部终止的流）
    pub fn start(&self) -> LineRun<'_> {
        LineRun {
            orchestrator: self,
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            state: RunState::new(),
            skipped: Vec::new(),
            sequence: 0,
        }
    }

    /// 执行完整运行（源记录）
    ///
    /// # 返回
    /// - Ok(RunOutcome): 源耗尽
    /// - Err: 配置错误,或 Abort 策略下的数据错误
    pub fn run<I>(&self, records: I) -> EngineResult<RunOutcome>
    where
        I: IntoIterator<Item = RawPieceRecord>,
    {
        self.drive(records, |run, record| run.process(&record))
    }

    /// 执行完整运行（已构造的工件,直接判定,不经文本准入）
    pub fn run_pieces<I>(&self, pieces: I) -> EngineResult<RunOutcome>
    where
        I: IntoIterator<Item = Piece>,
    {
        self.drive(pieces, |run, piece| run.process_piece(&piece))
    }

    fn drive<I, F>(&self, items: I, mut step: F) -> EngineResult<RunOutcome>
    where
        I: IntoIterator,
        F: FnMut(&mut LineRun<'_>, I::Item) -> EngineResult<PieceOutcome>,
    {
        let mut run = self.start();
        let span = info_span!("line_run", run_id = %run.run_id());
        let _guard = span.enter();

        info!(
            box_capacity = self.packer.capacity(),
            policy = ?self.policy,
            publisher = self.publisher.is_configured(),
            "开始执行产线运行"
        );

        for item in items {
            step(&mut run, item)?;
        }

        let outcome = run.finish();

        info!(
            accepted = outcome.state.accepted_total(),
            rejected = outcome.state.rejected_total(),
            skipped = outcome.skipped.len(),
            boxes_used = outcome.state.boxes_used(),
            current_box_fill = outcome.state.current_box_fill(),
            "产线运行完成"
        );

        Ok(outcome)
    }
}

// ==========================================
// LineRun - 单次运行会话
// ==========================================
// 独占 RunState,运行期间外部不可修改
pub struct LineRun<'a> {
    orchestrator: &'a LineOrchestrator,
    run_id: Uuid,
    started_at: DateTime<Utc>,
    state: RunState,
    skipped: Vec<SkippedPiece>,
    sequence: usize, // 已接收件数（含跳过）
}

impl<'a> LineRun<'a> {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// 当前状态（只读）
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// 处理一件源记录
    ///
    /// # 步骤
    /// 1. 准入 + 质检（数据错误按策略跳过或中止）
    /// 2. 不合格 → 原因统计（先于装箱,失败时 state 不变）
    /// 3. 装箱累计（每件必调）
    /// 4. 封箱事件发布（失败只记日志）
    pub fn process(&mut self, record: &RawPieceRecord) -> EngineResult<PieceOutcome> {
        self.sequence += 1;
        match self.orchestrator.inspector.inspect_record(record) {
            Ok((piece, inspection)) => self.apply(&piece, inspection),
            Err(e) => self.reject_malformed(e, record.row_number, record.id.clone()),
        }
    }

    /// 处理一件已构造的工件（颜色按原文判定,不做任何清理）
    ///
    /// 非文件来源,跳过记录中的行号为到达序号
    pub fn process_piece(&mut self, piece: &Piece) -> EngineResult<PieceOutcome> {
        self.sequence += 1;
        match self.orchestrator.inspector.inspect(piece) {
            Ok(inspection) => self.apply(piece, inspection),
            Err(e) => self.reject_malformed(e, self.sequence, Some(piece.id.to_string())),
        }
    }

    fn reject_malformed(
        &mut self,
        error: EngineError,
        row_number: usize,
        piece_id: Option<String>,
    ) -> EngineResult<PieceOutcome> {
        if !error.is_data_error() || self.orchestrator.policy == MalformedPolicy::Abort {
            return Err(error);
        }

        warn!(row = row_number, error = %error, "源记录不合规,跳过");
        let skipped = SkippedPiece {
            row_number,
            piece_id,
            error: error.to_string(),
        };
        self.skipped.push(skipped.clone());
        Ok(PieceOutcome::Skipped(skipped))
    }

    fn apply(&mut self, piece: &Piece, inspection: InspectionResult) -> EngineResult<PieceOutcome> {
        let orchestrator = self.orchestrator;

        debug!(
            piece_id = piece.id,
            classification = %inspection.classification,
            reasons = ?inspection.tags(),
            "工件质检完成"
        );

        if !inspection.is_accepted() {
            orchestrator
                .aggregator
                .record(&mut self.state, piece.id, &inspection.reasons)?;
        }

        let box_closed = orchestrator
            .packer
            .record(&mut self.state, inspection.classification)
            .map(|event| event.with_last_piece(piece.id));

        if let Some(event) = &box_closed {
            info!(
                box_number = event.box_number,
                capacity = event.pieces,
                "箱已装满,封箱并开启下一箱"
            );
            orchestrator.publisher.publish(event);
        }

        Ok(PieceOutcome::Processed {
            inspection,
            box_closed,
        })
    }

    /// 结束运行,交出最终状态
    pub fn finish(self) -> RunOutcome {
        RunOutcome {
            run_id: self.run_id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            state: self.state,
            box_capacity: self.orchestrator.packer.capacity(),
            skipped: self.skipped,
        }
    }
}
