// ==========================================
// 装机配置引擎 - 引擎层事件发布
// ==========================================
// 职责: 每次变更后通知展示层,实现依赖倒置
// 说明: Engine 层定义 trait,展示层实现适配器
// 红线: 发布失败只记录日志,不影响引擎状态
// ==========================================

use crate::domain::build::PlacementId;
use crate::domain::types::Category;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;

// ==========================================
// 装机事件类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildEventType {
    /// 组件已放置
    ItemPlaced,
    /// 组件已移除
    ItemRemoved,
    /// 单槽位组件已替换
    ItemReplaced,
    /// 单槽位冲突待决策
    ConflictRaised,
    /// 冲突已放弃
    ConflictAbandoned,
    /// 装机单已清空
    BuildCleared,
    /// 目录已加载
    CatalogLoaded,
    /// 目录不可用,降级运行
    CatalogDegraded,
}

impl BuildEventType {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &str {
        match self {
            BuildEventType::ItemPlaced => "ItemPlaced",
            BuildEventType::ItemRemoved => "ItemRemoved",
            BuildEventType::ItemReplaced => "ItemReplaced",
            BuildEventType::ConflictRaised => "ConflictRaised",
            BuildEventType::ConflictAbandoned => "ConflictAbandoned",
            BuildEventType::BuildCleared => "BuildCleared",
            BuildEventType::CatalogLoaded => "CatalogLoaded",
            BuildEventType::CatalogDegraded => "CatalogDegraded",
        }
    }
}

/// 装机事件
///
/// 只携带变更定位信息；完整状态由展示层通过 snapshot() 同步读取
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildEvent {
    pub event_type: BuildEventType,
    /// 相关放置ID
    pub placement_id: Option<PlacementId>,
    /// 相关类别
    pub category: Option<Category>,
    /// 事件发生后的组件数
    pub component_count: usize,
}

impl BuildEvent {
    pub fn new(event_type: BuildEventType, component_count: usize) -> Self {
        Self {
            event_type,
            placement_id: None,
            category: None,
            component_count,
        }
    }

    pub fn with_placement(mut self, placement_id: PlacementId) -> Self {
        self.placement_id = Some(placement_id);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================
pub trait BuildEventPublisher: Send + Sync {
    /// 发布装机事件
    fn publish(&self, event: &BuildEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
///
/// 用于不需要事件发布的场景（如单元测试）
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl BuildEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: &BuildEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            "NoOpEventPublisher: 跳过事件发布 - event_type={}",
            event.event_type.as_str()
        );
        Ok(())
    }
}

/// 可选的事件发布者包装
///
/// 简化 Option<Arc<dyn BuildEventPublisher>> 的使用
#[derive(Clone, Default)]
pub struct OptionalEventPublisher {
    inner: Option<Arc<dyn BuildEventPublisher>>,
}

impl OptionalEventPublisher {
    pub fn with_publisher(publisher: Arc<dyn BuildEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 发布事件（如果有发布者），失败只记录告警
    pub fn publish(&self, event: BuildEvent) {
        let Some(publisher) = &self.inner else {
            return;
        };

        if let Err(e) = publisher.publish(&event) {
            tracing::warn!(
                event_type = event.event_type.as_str(),
                error = %e,
                "装机事件发布失败"
            );
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FailingPublisher;

    impl BuildEventPublisher for FailingPublisher {
        fn publish(&self, _event: &BuildEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
            Err("render queue closed".into())
        }
    }

    #[derive(Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<BuildEventType>>,
    }

    impl BuildEventPublisher for RecordingPublisher {
        fn publish(&self, event: &BuildEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.events.lock().unwrap().push(event.event_type);
            Ok(())
        }
    }

    #[test]
    fn test_event_builder() {
        let event = BuildEvent::new(BuildEventType::ItemPlaced, 1)
            .with_placement(PlacementId(7))
            .with_category(Category::Memory);

        assert_eq!(event.placement_id, Some(PlacementId(7)));
        assert_eq!(event.category, Some(Category::Memory));
        assert_eq!(event.component_count, 1);
    }

    #[test]
    fn test_noop_publisher() {
        let event = BuildEvent::new(BuildEventType::BuildCleared, 0);
        assert!(NoOpEventPublisher.publish(&event).is_ok());
    }

    #[test]
    fn test_optional_publisher_forwards() {
        let recorder = Arc::new(RecordingPublisher::default());
        let publisher = OptionalEventPublisher::with_publisher(recorder.clone());
        assert!(publisher.is_configured());

        publisher.publish(BuildEvent::new(BuildEventType::ItemRemoved, 0));
        assert_eq!(*recorder.events.lock().unwrap(), vec![BuildEventType::ItemRemoved]);
    }

    #[test]
    fn test_optional_publisher_swallows_failure() {
        let publisher = OptionalEventPublisher::with_publisher(Arc::new(FailingPublisher));
        publisher.publish(BuildEvent::new(BuildEventType::ItemPlaced, 1));

        assert!(!OptionalEventPublisher::none().is_configured());
    }
}
