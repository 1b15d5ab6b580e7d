// ==========================================
// 装机配置引擎 - 派生信号引擎
// ==========================================
// 职责: 由当前装机单计算 功耗 / 兼容性 / 瓶颈
// 输入: Build
// 输出: BuildSignals
// 红线: 纯函数,不保留历史状态;不输出 NaN/Infinity
// ==========================================

use crate::config::EngineConfig;
use crate::domain::build::Build;
use crate::domain::signals::{
    BottleneckEstimate, BuildSignals, CompatibilityVerdict, NotApplicableReason, PowerDraw,
};
use crate::domain::types::{BottleneckBand, Category, CompatibilityStatus, LimitingComponent};

// ==========================================
// SignalEngine - 派生信号引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct SignalEngine {
    baseline_power_w: f64,
    required_categories: Vec<Category>,
    balance_dead_zone: f64,
    band_low_max_pct: f64,
    band_moderate_max_pct: f64,
}

impl SignalEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            baseline_power_w: config.baseline_power_w,
            required_categories: config.required_categories.clone(),
            balance_dead_zone: config.balance_dead_zone,
            band_low_max_pct: config.band_low_max_pct,
            band_moderate_max_pct: config.band_moderate_max_pct,
        }
    }

    /// 计算全部派生信号
    pub fn compute(&self, build: &Build) -> BuildSignals {
        BuildSignals {
            component_count: build.len(),
            power: self.power_draw(build),
            compatibility: self.compatibility(build),
            bottleneck: self.bottleneck(build),
        }
    }

    /// 总功耗 = 组件功耗之和 + 基础功耗
    pub fn power_draw(&self, build: &Build) -> PowerDraw {
        let components_w: f64 = build.iter().map(|p| p.item.power_draw).sum();

        PowerDraw {
            components_w,
            baseline_w: self.baseline_power_w,
            total_w: components_w + self.baseline_power_w,
        }
    }

    /// 兼容性结论 (仅检查必需类别是否存在)
    pub fn compatibility(&self, build: &Build) -> CompatibilityVerdict {
        let missing: Vec<Category> = self
            .required_categories
            .iter()
            .filter(|c| build.count(c) == 0)
            .cloned()
            .collect();

        let status = if missing.is_empty() {
            CompatibilityStatus::Complete
        } else {
            CompatibilityStatus::Incomplete
        };

        CompatibilityVerdict { status, missing }
    }

    /// 瓶颈估算
    ///
    /// 启发式估算,不是物理模型:
    /// - ratio = 显卡评分 / 处理器评分
    /// - ratio > 1 + 死区: 处理器受限, percent = |1 - 1/ratio| × 100
    /// - ratio < 1 - 死区: 显卡受限, percent = |1 - ratio| × 100
    /// - 其余视为均衡, percent = 0
    ///
    /// 仅在恰好一个处理器和一个显卡且评分均为正时计算
    pub fn bottleneck(&self, build: &Build) -> BottleneckEstimate {
        let processors: Vec<_> = build
            .iter()
            .filter(|p| p.category() == &Category::Processor)
            .collect();
        let accelerators: Vec<_> = build
            .iter()
            .filter(|p| p.category() == &Category::GraphicsAccelerator)
            .collect();

        let (cpu, gpu) = match (processors.as_slice(), accelerators.as_slice()) {
            ([], _) => return BottleneckEstimate::not_applicable(NotApplicableReason::MissingProcessor),
            (_, []) => {
                return BottleneckEstimate::not_applicable(
                    NotApplicableReason::MissingGraphicsAccelerator,
                )
            }
            ([cpu], [gpu]) => (cpu, gpu),
            _ => return BottleneckEstimate::not_applicable(NotApplicableReason::AmbiguousPairing),
        };

        let p = cpu.item.performance_score;
        let g = gpu.item.performance_score;
        if !is_usable_score(p) || !is_usable_score(g) {
            return BottleneckEstimate::not_applicable(NotApplicableReason::MissingScore);
        }

        let ratio = g / p;
        let (limiting, percent) = if ratio > 1.0 + self.balance_dead_zone {
            (Some(LimitingComponent::Processor), (1.0 - 1.0 / ratio).abs() * 100.0)
        } else if ratio < 1.0 - self.balance_dead_zone {
            (Some(LimitingComponent::GraphicsAccelerator), (1.0 - ratio).abs() * 100.0)
        } else {
            (None, 0.0)
        };

        BottleneckEstimate::Estimated {
            ratio,
            limiting,
            percent,
            band: self.classify_band(percent),
        }
    }

    /// 瓶颈百分比分级
    pub fn classify_band(&self, percent: f64) -> BottleneckBand {
        if percent <= self.band_low_max_pct {
            BottleneckBand::Low
        } else if percent <= self.band_moderate_max_pct {
            BottleneckBand::Moderate
        } else {
            BottleneckBand::High
        }
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

fn is_usable_score(score: f64) -> bool {
    score.is_finite() && score > 0.0
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::engine_config::CompatibilityPolicy;
    use crate::domain::catalog::CatalogItem;
    use crate::engine::placement::PlacementState;

    fn create_build(items: Vec<CatalogItem>) -> Build {
        // 多槽位测试需要放开单槽位限制
        let mut state = PlacementState::new(Vec::new());
        for item in items {
            state.add(item);
        }
        state.current_build().clone()
    }

    fn cpu(score: f64) -> CatalogItem {
        CatalogItem::new("cpu", Category::Processor, "CPU").with_performance_score(score)
    }

    fn gpu(score: f64) -> CatalogItem {
        CatalogItem::new("gpu", Category::GraphicsAccelerator, "GPU").with_performance_score(score)
    }

    #[test]
    fn test_power_draw_includes_baseline() {
        let engine = SignalEngine::default();
        let build = create_build(vec![
            cpu(90.0).with_power_draw(170.0),
            CatalogItem::new("r1", Category::Memory, "RAM").with_power_draw(15.0),
        ]);

        let power = engine.power_draw(&build);
        assert_eq!(power.components_w, 185.0);
        assert_eq!(power.baseline_w, 50.0);
        assert_eq!(power.total_w, 235.0);

        assert_eq!(engine.power_draw(&Build::new()).total_w, 50.0);
    }

    #[test]
    fn test_compatibility_policies() {
        let minimal = SignalEngine::default();
        let strict = SignalEngine::new(
            &EngineConfig::default().with_required_categories(CompatibilityPolicy::core_four()),
        );

        let empty = Build::new();
        assert_eq!(minimal.compatibility(&empty).status, CompatibilityStatus::Incomplete);

        let pair = create_build(vec![cpu(100.0), gpu(100.0)]);
        assert!(minimal.compatibility(&pair).is_complete());

        let verdict = strict.compatibility(&pair);
        assert_eq!(verdict.status, CompatibilityStatus::Incomplete);
        assert_eq!(verdict.missing, vec![Category::Mainboard, Category::PowerSupply]);
    }

    #[test]
    fn test_bottleneck_balanced() {
        let engine = SignalEngine::default();
        let estimate = engine.bottleneck(&create_build(vec![cpu(100.0), gpu(100.0)]));

        assert_eq!(estimate.limiting(), None);
        assert_eq!(estimate.percent(), Some(0.0));
        assert_eq!(estimate.band(), Some(BottleneckBand::Low));
    }

    #[test]
    fn test_bottleneck_dead_zone_edges() {
        let engine = SignalEngine::default();

        let slightly_gpu_heavy = engine.bottleneck(&create_build(vec![cpu(100.0), gpu(104.0)]));
        assert_eq!(slightly_gpu_heavy.percent(), Some(0.0));

        let slightly_cpu_heavy = engine.bottleneck(&create_build(vec![cpu(100.0), gpu(96.0)]));
        assert_eq!(slightly_cpu_heavy.percent(), Some(0.0));

        // 死区边界本身视为均衡
        let upper_edge = engine.bottleneck(&create_build(vec![cpu(100.0), gpu(105.0)]));
        assert_eq!(upper_edge.percent(), Some(0.0));
        assert_eq!(upper_edge.limiting(), None);

        let lower_edge = engine.bottleneck(&create_build(vec![cpu(100.0), gpu(95.0)]));
        assert_eq!(lower_edge.percent(), Some(0.0));
        assert_eq!(lower_edge.limiting(), None);
    }

    #[test]
    fn test_bottleneck_processor_limited() {
        let engine = SignalEngine::default();
        let estimate = engine.bottleneck(&create_build(vec![cpu(100.0), gpu(130.0)]));

        assert_eq!(estimate.limiting(), Some(LimitingComponent::Processor));
        let percent = estimate.percent().unwrap();
        assert!((percent - 23.0769).abs() < 0.01, "percent={}", percent);
        assert_eq!(estimate.band(), Some(BottleneckBand::High));
    }

    #[test]
    fn test_bottleneck_graphics_limited() {
        let engine = SignalEngine::default();
        let estimate = engine.bottleneck(&create_build(vec![cpu(130.0), gpu(100.0)]));

        assert_eq!(estimate.limiting(), Some(LimitingComponent::GraphicsAccelerator));
        let percent = estimate.percent().unwrap();
        assert!((percent - 23.0769).abs() < 0.01, "percent={}", percent);
    }

    #[test]
    fn test_bottleneck_moderate_band() {
        let engine = SignalEngine::default();
        // ratio = 0.9 → 10%
        let estimate = engine.bottleneck(&create_build(vec![cpu(100.0), gpu(90.0)]));
        assert_eq!(estimate.band(), Some(BottleneckBand::Moderate));
    }

    #[test]
    fn test_bottleneck_not_applicable_cases() {
        let engine = SignalEngine::default();

        assert_eq!(
            engine.bottleneck(&create_build(vec![gpu(100.0)])),
            BottleneckEstimate::not_applicable(NotApplicableReason::MissingProcessor)
        );
        assert_eq!(
            engine.bottleneck(&create_build(vec![cpu(100.0)])),
            BottleneckEstimate::not_applicable(NotApplicableReason::MissingGraphicsAccelerator)
        );
        assert_eq!(
            engine.bottleneck(&create_build(vec![cpu(100.0), cpu(90.0), gpu(100.0)])),
            BottleneckEstimate::not_applicable(NotApplicableReason::AmbiguousPairing)
        );
        assert_eq!(
            engine.bottleneck(&create_build(vec![cpu(0.0), gpu(100.0)])),
            BottleneckEstimate::not_applicable(NotApplicableReason::MissingScore)
        );
        assert_eq!(
            engine.bottleneck(&create_build(vec![cpu(100.0), gpu(f64::NAN)])),
            BottleneckEstimate::not_applicable(NotApplicableReason::MissingScore)
        );
    }

    #[test]
    fn test_classify_band_thresholds() {
        let engine = SignalEngine::default();
        assert_eq!(engine.classify_band(5.0), BottleneckBand::Low);
        assert_eq!(engine.classify_band(5.1), BottleneckBand::Moderate);
        assert_eq!(engine.classify_band(15.0), BottleneckBand::Moderate);
        assert_eq!(engine.classify_band(15.1), BottleneckBand::High);
    }
}
