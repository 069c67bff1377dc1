//! Component lifecycle management

use crate::component::{Component, ComponentError, Context, LifecyclePhase, Node};
use crate::events::DomEvent;

/// Manages the lifecycle of one component instance
///
/// Hosts drive every component call through the manager so that calls made
/// in the wrong phase are rejected instead of reaching the component.
pub struct LifecycleManager<C: Component> {
    /// Current phase of the component
    phase: LifecyclePhase,

    /// Whether `initialize` already ran
    initialized: bool,

    /// Component instance being managed
    component: C,

    /// Context for the component
    context: Context,
}

impl<C: Component> LifecycleManager<C> {
    /// Create a component from props and manage it
    pub fn new(props: C::Props, context: Context) -> Self {
        let component = C::create(props, context.clone());
        Self {
            phase: LifecyclePhase::Created,
            initialized: false,
            component,
            context,
        }
    }

    /// Get the current lifecycle phase
    pub fn current_phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Get a reference to the component
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Get a mutable reference to the component
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Get a reference to the component's context
    pub fn context(&self) -> &Context {
        &self.context
    }

    fn enter(&mut self, phase: LifecyclePhase) {
        self.phase = phase;
        self.context.set_lifecycle_phase(phase);
    }

    fn expect_phase(&self, expected: LifecyclePhase, operation: &str) -> Result<(), ComponentError> {
        if self.phase != expected {
            return Err(ComponentError::InvalidLifecycleTransition(
                self.phase,
                operation.to_string(),
            ));
        }
        Ok(())
    }

    /// Initialize the component (post-creation)
    pub fn initialize(&mut self) -> Result<(), ComponentError> {
        self.expect_phase(LifecyclePhase::Created, "initialize")?;
        if self.initialized {
            return Err(ComponentError::InvalidLifecycleTransition(
                self.phase,
                "initialize twice".to_string(),
            ));
        }
        self.component.initialize()?;
        self.initialized = true;
        Ok(())
    }

    /// Mount the component to the tree
    pub fn mount(&mut self) -> Result<(), ComponentError> {
        self.expect_phase(LifecyclePhase::Created, "mount")?;
        if !self.initialized {
            self.initialize()?;
        }

        self.enter(LifecyclePhase::Mounting);
        match self.component.mount() {
            Ok(()) => {
                self.enter(LifecyclePhase::Mounted);
                log::debug!("{} mounted", std::any::type_name::<C>());
                Ok(())
            }
            Err(err) => {
                // Reset phase on error
                self.enter(LifecyclePhase::Created);
                Err(err)
            }
        }
    }

    /// Update the component with new props
    pub fn update(&mut self, props: C::Props) -> Result<(), ComponentError> {
        self.expect_phase(LifecyclePhase::Mounted, "update")?;

        self.enter(LifecyclePhase::BeforeUpdate);
        let result = self.apply_update(props);

        // Stay mounted even when a hook failed
        self.enter(LifecyclePhase::Mounted);
        self.context.scope().mark_dirty();
        result
    }

    fn apply_update(&mut self, props: C::Props) -> Result<(), ComponentError> {
        self.component.before_update(&props)?;
        self.enter(LifecyclePhase::Updating);
        self.component.update(props)?;
        self.component.after_update()
    }

    /// Route a listener message to the component
    pub fn handle(&mut self, message: C::Message, event: &mut DomEvent) -> Result<(), ComponentError> {
        self.expect_phase(LifecyclePhase::Mounted, "handle events")?;
        self.component.handle(message, event)
    }

    /// Render the component
    ///
    /// Rendering is allowed before mount so hosts can build the native tree
    /// the component binds to while mounting.
    pub fn render(&self) -> Result<Vec<Node<C::Message>>, ComponentError> {
        match self.phase {
            LifecyclePhase::Created | LifecyclePhase::Mounted => self.component.render(),
            phase => Err(ComponentError::InvalidLifecycleTransition(
                phase,
                "render".to_string(),
            )),
        }
    }

    /// Unmount the component from the tree
    pub fn unmount(&mut self) -> Result<(), ComponentError> {
        self.expect_phase(LifecyclePhase::Mounted, "unmount")?;

        self.enter(LifecyclePhase::BeforeUnmount);
        self.component.before_unmount()?;

        self.enter(LifecyclePhase::Unmounting);
        self.component.unmount()?;

        self.enter(LifecyclePhase::Unmounted);
        log::debug!("{} unmounted", std::any::type_name::<C>());
        Ok(())
    }

    /// Release the component
    pub fn into_component(self) -> C {
        self.component
    }
}
