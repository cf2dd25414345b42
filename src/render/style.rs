use serde::Deserialize;

/// Output frame in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl Default for FrameSize {
    fn default() -> Self {
        // 9:16 vertical
        Self {
            width: 1080,
            height: 1920,
        }
    }
}

/// Caption appearance passed to the subtitles filter as an ASS `force_style`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CaptionStyle {
    pub font_size: u32,
    /// Vertical margin from the anchored edge, in script pixels
    pub margin_v: u32,
    /// ASS numpad alignment (1-9, 5 is middle centre)
    pub alignment: u8,
    /// `&HAABBGGRR` colour of the outline
    pub outline_colour: String,
    /// `&HAABBGGRR` colour of the text
    pub primary_colour: String,
    pub font_name: String,
    pub border_style: u8,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_size: 20,
            margin_v: 70,
            alignment: 5,
            outline_colour: "&H00000000".to_string(),
            primary_colour: "&H0000FFFF".to_string(),
            font_name: "Arial".to_string(),
            border_style: 0,
        }
    }
}

impl CaptionStyle {
    /// `Key=Value` list for the subtitles filter; ffmpeg escaping happens at the call site
    pub fn force_style(&self) -> String {
        format!(
            "Fontsize={},MarginV={},OutlineColour={},BorderStyle={},PrimaryColour={},FontName={},Alignment={}",
            self.font_size,
            self.margin_v,
            style_text(&self.outline_colour),
            self.border_style,
            style_text(&self.primary_colour),
            style_text(&self.font_name),
            self.alignment
        )
    }
}

/// ASS style lists cannot escape their `,` separator
fn style_text(value: &str) -> String {
    value.replace(',', "")
}

/// Escape a filter option value (`\`, `:` and `'`)
pub(crate) fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ':' | '\'') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Quote an already escaped option value for the filtergraph parser
///
/// Inside single quotes the graph parser keeps backslashes and `[],;` as is;
/// an embedded `'` closes the quote, is escaped, and the quote reopens.
pub(crate) fn quote_graph_value(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Option value ready for a `-vf` graph: escaped, then quoted
pub(crate) fn filter_arg(value: &str) -> String {
    quote_graph_value(&escape_filter_value(value))
}
