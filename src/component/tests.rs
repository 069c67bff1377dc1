//! Tests for component lifecycle management

use crate::component::{Component, ComponentError, Context, LifecycleManager, LifecyclePhase, Node};
use crate::events::{DomEvent, EventType};
use crate::state::Signal;

// A simple test component that records which hooks ran
#[derive(Debug)]
struct TestComponent {
    props: TestProps,
    calls: Vec<&'static str>,
    clicks: Signal<u32>,
}

#[derive(Debug, Clone)]
struct TestProps {
    message: String,
    fail_mount: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum TestMessage {
    Clicked,
}

impl Component for TestComponent {
    type Props = TestProps;
    type Message = TestMessage;

    fn create(props: Self::Props, context: Context) -> Self {
        Self {
            props,
            calls: vec!["create"],
            clicks: context.state(0),
        }
    }

    fn initialize(&mut self) -> Result<(), ComponentError> {
        self.calls.push("initialize");
        Ok(())
    }

    fn mount(&mut self) -> Result<(), ComponentError> {
        if self.props.fail_mount {
            return Err(ComponentError::MountError("refused".to_string()));
        }
        self.calls.push("mount");
        Ok(())
    }

    fn before_update(&mut self, new_props: &Self::Props) -> Result<(), ComponentError> {
        self.calls.push("before_update");
        assert_eq!(new_props.message, "Updated", "Expected updated message");
        Ok(())
    }

    fn update(&mut self, props: Self::Props) -> Result<(), ComponentError> {
        self.calls.push("update");
        self.props = props;
        Ok(())
    }

    fn after_update(&mut self) -> Result<(), ComponentError> {
        self.calls.push("after_update");
        Ok(())
    }

    fn handle(&mut self, message: TestMessage, _event: &mut DomEvent) -> Result<(), ComponentError> {
        match message {
            TestMessage::Clicked => self.clicks.update(|n| *n += 1),
        }
        Ok(())
    }

    fn before_unmount(&mut self) -> Result<(), ComponentError> {
        self.calls.push("before_unmount");
        Ok(())
    }

    fn unmount(&mut self) -> Result<(), ComponentError> {
        self.calls.push("unmount");
        Ok(())
    }

    fn render(&self) -> Result<Vec<Node<TestMessage>>, ComponentError> {
        Ok(vec![Node::element("p")
            .attr("title", &self.props.message)
            .on(EventType::Click, TestMessage::Clicked)])
    }
}

fn props(message: &str) -> TestProps {
    TestProps {
        message: message.to_string(),
        fail_mount: false,
    }
}

#[test]
fn test_component_lifecycle() {
    let mut manager = LifecycleManager::<TestComponent>::new(props("Hello"), Context::new());
    assert_eq!(manager.current_phase(), LifecyclePhase::Created);

    // Rendering before mount is allowed
    let tree = manager.render().expect("render before mount should succeed");
    assert_eq!(tree[0].attribute("title"), Some("Hello"));

    manager.mount().expect("mount should succeed");
    assert_eq!(manager.current_phase(), LifecyclePhase::Mounted);
    assert_eq!(manager.context().lifecycle_phase(), LifecyclePhase::Mounted);

    manager
        .update(props("Updated"))
        .expect("update should succeed");
    assert_eq!(manager.current_phase(), LifecyclePhase::Mounted);
    assert_eq!(manager.component().props.message, "Updated");

    manager.unmount().expect("unmount should succeed");
    assert_eq!(manager.current_phase(), LifecyclePhase::Unmounted);

    assert_eq!(
        manager.component().calls,
        vec![
            "create",
            "initialize",
            "mount",
            "before_update",
            "update",
            "after_update",
            "before_unmount",
            "unmount",
        ]
    );
}

#[test]
fn test_out_of_order_transitions_are_rejected() {
    let mut manager = LifecycleManager::<TestComponent>::new(props("Hello"), Context::new());

    let err = manager.update(props("Updated")).unwrap_err();
    assert_eq!(
        err,
        ComponentError::InvalidLifecycleTransition(LifecyclePhase::Created, "update".to_string())
    );
    assert!(manager.unmount().is_err());

    let mut event = DomEvent::new(EventType::Click);
    assert!(manager.handle(TestMessage::Clicked, &mut event).is_err());

    manager.mount().unwrap();
    assert!(manager.mount().is_err());
    manager.unmount().unwrap();
    assert!(manager.render().is_err());
}

#[test]
fn test_failed_mount_resets_phase() {
    let failing = TestProps {
        message: "Hello".to_string(),
        fail_mount: true,
    };
    let mut manager = LifecycleManager::<TestComponent>::new(failing, Context::new());

    let err = manager.mount().unwrap_err();
    assert!(err.to_string().contains("refused"));
    assert_eq!(manager.current_phase(), LifecyclePhase::Created);
}

#[test]
fn test_handle_and_update_mark_scope_dirty() {
    let mut manager = LifecycleManager::<TestComponent>::new(props("Hello"), Context::new());
    manager.mount().unwrap();
    assert!(!manager.context().scope().take_dirty());

    let mut event = DomEvent::new(EventType::Click);
    manager.handle(TestMessage::Clicked, &mut event).unwrap();
    assert_eq!(*manager.component().clicks.get(), 1);
    assert!(manager.context().scope().take_dirty());

    manager.update(props("Updated")).unwrap();
    assert!(manager.context().scope().take_dirty());
}
