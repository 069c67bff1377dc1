// Theme support for the kit

use std::fmt::Write;

use crate::kit::components::input::{classes, InputSize};

/// Theme for kit components
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Primary color, used for the focus ring
    pub primary_color: String,
    /// Text color
    pub text_color: String,
    /// Placeholder and icon color
    pub muted_color: String,
    /// Background color
    pub background_color: String,
    /// Border color
    pub border_color: String,
    /// Border radius
    pub border_radius: String,
    /// Font family
    pub font_family: String,
    /// Opacity of disabled controls
    pub disabled_opacity: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#0070f3".to_string(),
            text_color: "#333333".to_string(),
            muted_color: "#999999".to_string(),
            background_color: "#ffffff".to_string(),
            border_color: "#cccccc".to_string(),
            border_radius: "4px".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            disabled_opacity: 0.5,
        }
    }
}

impl Theme {
    /// Height and font size for a size variant
    pub fn metrics(&self, size: InputSize) -> (&'static str, &'static str) {
        match size {
            InputSize::Small => ("28px", "13px"),
            InputSize::Medium => ("36px", "15px"),
            InputSize::Large => ("44px", "17px"),
        }
    }

    /// Stylesheet for the input's class-name contract
    pub fn input_stylesheet(&self) -> String {
        let mut css = String::new();

        // Writing to a String cannot fail
        let _ = writeln!(
            css,
            ".{root} {{ display: inline-flex; align-items: center; box-sizing: border-box; \
             width: 100%; font-family: {font}; color: {text}; background: {bg}; \
             border: solid 1px {border}; border-radius: {radius}; cursor: text; }}",
            root = classes::ROOT,
            font = self.font_family,
            text = self.text_color,
            bg = self.background_color,
            border = self.border_color,
            radius = self.border_radius,
        );

        for size in [InputSize::Small, InputSize::Medium, InputSize::Large] {
            let (height, font_size) = self.metrics(size);
            let _ = writeln!(
                css,
                ".{class} {{ height: {height}; font-size: {font_size}; }}",
                class = size.class_name(),
            );
        }

        let _ = writeln!(
            css,
            ".{focused} {{ border-color: {primary}; box-shadow: 0 0 0 2px {primary}33; }}",
            focused = classes::FOCUSED,
            primary = self.primary_color,
        );
        let _ = writeln!(
            css,
            ".{disabled} {{ opacity: {opacity}; cursor: not-allowed; }}",
            disabled = classes::DISABLED,
            opacity = self.disabled_opacity,
        );
        let _ = writeln!(
            css,
            ".{control} {{ flex: 1 1 auto; min-width: 0; height: 100%; padding: 0 0.75em; \
             border: none; outline: none; background: none; font: inherit; color: inherit; }}\n\
             .{control}::placeholder {{ color: {muted}; }}\n\
             .{disabled} .{control} {{ cursor: not-allowed; }}",
            control = classes::CONTROL,
            disabled = classes::DISABLED,
            muted = self.muted_color,
        );
        let _ = writeln!(
            css,
            ".{prefix}, .{suffix} {{ display: inline-flex; flex: 0 0 auto; align-items: center; }}\n\
             .{prefix} ::slotted(*) {{ margin-left: 0.75em; }}\n\
             .{suffix} ::slotted(*) {{ margin-right: 0.75em; }}",
            prefix = classes::PREFIX,
            suffix = classes::SUFFIX,
        );
        let _ = writeln!(
            css,
            ".{clear} {{ display: inline-flex; align-items: center; width: 1.25em; \
             margin-right: 0.75em; padding: 0; border: none; background: none; \
             color: {muted}; cursor: pointer; }}\n\
             .{clear}:hover {{ color: {text}; }}\n\
             .{clear} svg {{ width: 100%; height: auto; }}\n\
             .{empty} .{clear} {{ visibility: hidden; }}",
            clear = classes::CLEAR,
            empty = classes::EMPTY,
            muted = self.muted_color,
            text = self.text_color,
        );

        css
    }
}
