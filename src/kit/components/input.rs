// Input component for the kit

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentError, Context, Node};
use crate::events::{DomEvent, EventType};
use crate::platform::NativeInput;
use crate::state::Signal;

/// Class names the input renders; the stylesheet keys on these.
pub mod classes {
    pub const ROOT: &str = "s-input";
    pub const SMALL: &str = "s-input--small";
    pub const MEDIUM: &str = "s-input--medium";
    pub const LARGE: &str = "s-input--large";
    pub const DISABLED: &str = "s-input--disabled";
    pub const FOCUSED: &str = "s-input--focused";
    pub const EMPTY: &str = "s-input--empty";
    pub const PREFIX: &str = "s-input__prefix";
    pub const CONTROL: &str = "s-input__control";
    pub const CLEAR: &str = "s-input__clear";
    pub const SUFFIX: &str = "s-input__suffix";
}

/// Input size variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSize {
    Small,
    Medium,
    Large,
}

impl InputSize {
    /// Match a `size` attribute; anything else has no size
    pub fn parse(size: &str) -> Option<Self> {
        match size {
            "small" => Some(InputSize::Small),
            "medium" => Some(InputSize::Medium),
            "large" => Some(InputSize::Large),
            _ => None,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            InputSize::Small => classes::SMALL,
            InputSize::Medium => classes::MEDIUM,
            InputSize::Large => classes::LARGE,
        }
    }
}

/// Input props
///
/// Field names match the element's attribute names, so a JSON object of
/// attributes deserializes directly. Nothing here is validated: values are
/// forwarded to the native input as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputProps {
    /// Input type (text, number, email, etc.)
    #[serde(rename = "type")]
    pub input_type: String,
    /// One of `small`, `medium` or `large`
    pub size: String,
    pub name: String,
    /// Input value
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Whether the input is disabled
    pub disabled: bool,
    pub readonly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minlength: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocapitalize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocorrect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autofocus: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputmode: Option<String>,
    /// Render a clear button while the input holds a value
    pub clearable: bool,
}

impl Default for InputProps {
    fn default() -> Self {
        Self {
            input_type: "text".to_string(),
            size: "medium".to_string(),
            name: String::new(),
            value: String::new(),
            placeholder: None,
            disabled: false,
            readonly: false,
            minlength: None,
            maxlength: None,
            min: None,
            max: None,
            step: None,
            autocapitalize: None,
            autocorrect: None,
            autocomplete: None,
            autofocus: None,
            inputmode: None,
            clearable: false,
        }
    }
}

impl InputProps {
    /// Props from a JSON object keyed by attribute name
    pub fn from_json(json: &str) -> Result<Self, crate::Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply one HTML attribute; `None` means the attribute was removed
    ///
    /// Boolean attributes are on when present unless spelled `"false"`.
    /// Numbers that do not parse count as absent. Unknown names are ignored.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) {
        let defaults = InputProps::default();
        let text = |v: Option<&str>| v.map(str::to_string);
        let flag = |v: Option<&str>| v.is_some_and(|v| v != "false");

        match name.to_ascii_lowercase().as_str() {
            "type" => self.input_type = text(value).unwrap_or(defaults.input_type),
            "size" => self.size = text(value).unwrap_or(defaults.size),
            "name" => self.name = text(value).unwrap_or(defaults.name),
            "value" => self.value = text(value).unwrap_or(defaults.value),
            "placeholder" => self.placeholder = text(value),
            "disabled" => self.disabled = flag(value),
            "readonly" => self.readonly = flag(value),
            "minlength" => self.minlength = parse_number(name, value),
            "maxlength" => self.maxlength = parse_number(name, value),
            "min" => self.min = parse_number(name, value),
            "max" => self.max = parse_number(name, value),
            "step" => self.step = parse_number(name, value),
            "autocapitalize" => self.autocapitalize = text(value),
            "autocorrect" => self.autocorrect = text(value),
            "autocomplete" => self.autocomplete = text(value),
            "autofocus" => self.autofocus = value.map(|v| v != "false"),
            "inputmode" => self.inputmode = text(value),
            "clearable" => self.clearable = flag(value),
            other => log::debug!("ignoring unknown input attribute `{other}`"),
        }
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: Option<&str>) -> Option<T> {
    let value = value?;
    match value.trim().parse() {
        Ok(number) => Some(number),
        Err(_) => {
            log::debug!("attribute `{name}` is not a number: {value:?}");
            None
        }
    }
}

/// Messages sent by the input's render tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMessage {
    /// Native control gained focus
    Focus,
    /// Native control lost focus
    Blur,
    /// User edited the native control
    Input,
    /// Click anywhere inside the widget
    RootClick,
    /// Mouse pressed on the clear button
    ClearMouseDown,
    /// Clear button activated
    ClearClick,
}

/// Emitted when typing or clearing changes the value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChanged {
    pub value: String,
}

/// Emitted when the native control gains or loses focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChanged {
    pub has_focus: bool,
}

/// Imperative focus handle
///
/// Completion only means the request was made; the focus state changes when
/// the platform delivers the resulting focus or blur event.
#[async_trait(?Send)]
pub trait FocusControl {
    /// Sets focus on the input
    async fn set_focus(&mut self);

    /// Removes focus from the input
    async fn remove_focus(&mut self);
}

/// Styled text input wrapping one native input element
///
/// # Examples
///
/// ```
/// use s_input::kit::components::input::{Input, InputProps};
/// use s_input::component::{Component, Context};
///
/// let input = Input::create(
///     InputProps { clearable: true, ..InputProps::default() },
///     Context::new(),
/// );
/// assert!(input.is_empty());
/// ```
pub struct Input {
    props: InputProps,
    value: Signal<String>,
    has_focus: Signal<bool>,
    /// The rendered native control, bound while mounted
    input: Option<Box<dyn NativeInput>>,
    context: Context,
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Input")
            .field("props", &self.props)
            .field("value", &self.value)
            .field("has_focus", &self.has_focus)
            .field("attached", &self.input.is_some())
            .finish()
    }
}

impl Input {
    /// Current value
    pub fn value(&self) -> String {
        self.value.get().clone()
    }

    /// Set the value from the host
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.props.value.clone_from(&value);
        self.value.replace_if_changed(value);
    }

    pub fn is_empty(&self) -> bool {
        self.value.get().is_empty()
    }

    pub fn has_focus(&self) -> bool {
        *self.has_focus.get()
    }

    /// Props as last supplied, with the live value
    pub fn props(&self) -> InputProps {
        InputProps {
            value: self.value(),
            ..self.props.clone()
        }
    }

    /// Recognised size, if any
    pub fn size(&self) -> Option<InputSize> {
        InputSize::parse(&self.props.size)
    }

    /// Bind the native control created for the `s-input__control` node
    pub fn attach(&mut self, native: Box<dyn NativeInput>) {
        if self.input.replace(native).is_some() {
            log::debug!("input reference rebound");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.input.is_some()
    }

    fn show_clear(&self) -> bool {
        self.props.clearable && !self.is_empty()
    }

    /// Ask the native control for focus; `has_focus` follows the focus event
    pub fn request_focus(&self) {
        match &self.input {
            Some(input) => input.focus(),
            None => log::warn!("focus requested on an input that is not mounted"),
        }
    }

    /// Ask the native control to give up focus
    pub fn request_blur(&self) {
        match &self.input {
            Some(input) => input.blur(),
            None => log::warn!("blur requested on an input that is not mounted"),
        }
    }

    fn set_has_focus(&self, has_focus: bool) {
        if self.has_focus.replace_if_changed(has_focus) {
            log::trace!("input focus changed: {has_focus}");
            self.context.events().emit(&FocusChanged { has_focus });
        }
    }

    fn set_value_internal(&mut self, value: String) {
        if self.value.replace_if_changed(value.clone()) {
            log::trace!("input value changed: {value:?}");
            self.context.events().emit(&ValueChanged { value });
        }
    }

    fn render_control(&self) -> Node<InputMessage> {
        let props = &self.props;
        Node::element("input")
            .class(classes::CONTROL)
            .node_ref()
            .attr("type", &props.input_type)
            .attr("name", &props.name)
            .attr("value", &*self.value.get())
            .attr_opt("placeholder", props.placeholder.as_ref())
            .bool_attr("disabled", props.disabled)
            .bool_attr("readonly", props.readonly)
            .attr_opt("minlength", props.minlength)
            .attr_opt("maxlength", props.maxlength)
            .attr_opt("min", props.min)
            .attr_opt("max", props.max)
            .attr_opt("step", props.step)
            .attr_opt("autocapitalize", props.autocapitalize.as_ref())
            .attr_opt("autocomplete", props.autocomplete.as_ref())
            .attr_opt("autocorrect", props.autocorrect.as_ref())
            .bool_attr("autofocus", props.autofocus.unwrap_or(false))
            .attr_opt("inputmode", props.inputmode.as_ref())
            .on(EventType::Focus, InputMessage::Focus)
            .on(EventType::Blur, InputMessage::Blur)
            .on(EventType::Input, InputMessage::Input)
    }

    fn render_clear(&self) -> Node<InputMessage> {
        // tabindex -1 keeps the button out of the tab order
        Node::element("button")
            .class(classes::CLEAR)
            .attr("type", "button")
            .attr("tabindex", "-1")
            .on(EventType::MouseDown, InputMessage::ClearMouseDown)
            .on(EventType::Click, InputMessage::ClearClick)
            .child(clear_icon())
    }
}

/// Circled cross
fn clear_icon() -> Node<InputMessage> {
    let stroke = |d: &str| {
        Node::svg("path")
            .attr("d", d)
            .attr("stroke-linecap", "round")
    };

    Node::svg("svg").attr("viewBox", "0 0 53 53").child(
        Node::svg("g")
            .attr("stroke", "none")
            .attr("stroke-width", "1")
            .attr("fill", "none")
            .child(
                Node::svg("g")
                    .attr("transform", "translate(2.000000, 2.000000)")
                    .attr("stroke", "currentColor")
                    .attr("stroke-width", "4")
                    .child(stroke("M17.3388247,17.3388247 L31.9410878,31.9410878"))
                    .child(stroke("M17.3388247,31.9410878 L31.9410878,17.3388247"))
                    .child(
                        Node::svg("circle")
                            .attr("cx", "24.5")
                            .attr("cy", "24.5")
                            .attr("r", "24.5"),
                    ),
            ),
    )
}

impl Component for Input {
    type Props = InputProps;
    type Message = InputMessage;

    fn create(props: Self::Props, context: Context) -> Self {
        Self {
            value: context.state(props.value.clone()),
            has_focus: context.state(false),
            input: None,
            props,
            context,
        }
    }

    fn mount(&mut self) -> Result<(), ComponentError> {
        if self.input.is_none() {
            return Err(ComponentError::MountError(
                "native input was not bound before mount".to_string(),
            ));
        }
        Ok(())
    }

    fn update(&mut self, props: Self::Props) -> Result<(), ComponentError> {
        // Typed text survives until the host supplies a different value
        if props.value != self.props.value {
            self.value.replace_if_changed(props.value.clone());
        }
        self.props = props;
        Ok(())
    }

    fn handle(&mut self, message: InputMessage, event: &mut DomEvent) -> Result<(), ComponentError> {
        log::trace!("input message {message:?} ({})", event.event_type());
        match message {
            InputMessage::Focus => self.set_has_focus(true),
            InputMessage::Blur => self.set_has_focus(false),
            InputMessage::Input => {
                if let Some(live) = self.input.as_ref().map(|input| input.value()) {
                    self.set_value_internal(live);
                }
            }
            InputMessage::RootClick => self.request_focus(),
            // Keep focus on the control while the button is pressed
            InputMessage::ClearMouseDown => event.prevent_default(),
            InputMessage::ClearClick => self.set_value_internal(String::new()),
        }
        Ok(())
    }

    fn unmount(&mut self) -> Result<(), ComponentError> {
        self.input = None;
        Ok(())
    }

    fn render(&self) -> Result<Vec<Node<InputMessage>>, ComponentError> {
        let mut root = Node::element("div").class(classes::ROOT);
        if let Some(size) = self.size() {
            root = root.class(size.class_name());
        }

        let root = root
            .class_if(classes::DISABLED, self.props.disabled)
            .class_if(classes::FOCUSED, self.has_focus())
            .class_if(classes::EMPTY, self.is_empty())
            .on(EventType::Click, InputMessage::RootClick)
            .child(
                Node::element("span")
                    .class(classes::PREFIX)
                    .child(Node::slot("prefix")),
            )
            .child(self.render_control())
            .child_opt(self.show_clear().then(|| self.render_clear()))
            .child(
                Node::element("span")
                    .class(classes::SUFFIX)
                    .child(Node::slot("suffix")),
            );

        Ok(vec![root])
    }
}

#[async_trait(?Send)]
impl FocusControl for Input {
    async fn set_focus(&mut self) {
        self.request_focus();
    }

    async fn remove_focus(&mut self) {
        self.request_blur();
    }
}
