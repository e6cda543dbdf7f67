//! Inline CSS for every preview element. Rich-text paste targets strip
//! stylesheets, so nothing here relies on classes.

use mp_core::{EditorTheme, ImageRatio};

pub const MUTED_TAG: &str = "color:#ccc;font-size:0.9em;display:inline-block;";
pub const PLACEHOLDER_BOX: &str = "margin:32px 0;border:1px dashed #e5e7eb;border-radius:8px;padding:32px;color:#9ca3af;text-align:center;font-size:14px;";
pub const FOOTER: &str = "margin-top:80px;text-align:center;font-size:12px;color:#cbd5e1;";
pub const FOOTER_RULE: &str = "display:inline-block;width:24px;height:1px;background:#e2e8f0;vertical-align:middle;margin:0 12px;";
pub const IMAGE_CONTAINER: &str = "margin:32px 0;";
pub const LIST_BODY: &str = "flex:1;";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Styles {
    pub container: String,
    pub title: String,
    pub heading: String,
    pub subheading: String,
    pub paragraph: String,
    pub emphasis: String,
    pub quote: String,
    pub list_item: String,
    pub list_marker: String,
    pub list_bullet: String,
    pub image: String,
    pub inline_image: String,
}

/// Crop rule applied to every resolved image.
pub fn ratio_style(ratio: ImageRatio) -> &'static str {
    match ratio {
        ImageRatio::Original => "",
        ImageRatio::Square => "aspect-ratio:1 / 1;object-fit:cover;",
        ImageRatio::FourThree => "aspect-ratio:4 / 3;object-fit:cover;",
    }
}

impl Styles {
    pub fn new(theme: &EditorTheme, ratio: ImageRatio) -> Self {
        let c = &theme.colors;
        let paragraph =
            "font-size:15px;margin-bottom:20px;text-align:justify;letter-spacing:0.5px;".to_string();
        let image = format!(
            "width:100%;border-radius:{};display:block;box-shadow:0 2px 8px rgba(0, 0, 0, 0.08);{}",
            theme.border_radius,
            ratio_style(ratio)
        );
        Self {
            container: format!(
                "font-family:{};color:{};line-height:1.8;background-color:{};min-height:100%;padding:24px;",
                theme.font_family, c.text, c.background
            ),
            title: format!(
                "font-size:22px;font-weight:bold;color:{};margin-bottom:32px;margin-top:0px;line-height:1.4;",
                c.primary
            ),
            heading: format!(
                "font-size:18px;font-weight:bold;color:{};border-left:4px solid {};padding-left:12px;margin:56px 0 24px 0;display:flex;align-items:center;",
                c.primary, c.accent
            ),
            subheading: format!(
                "font-size:16px;font-weight:bold;color:{};margin:32px 0 16px 0;",
                c.secondary
            ),
            emphasis: format!("font-weight:bold;color:{};", c.accent),
            quote: format!(
                "background-color:{}10;border-left:3px solid {};padding:16px 20px;margin:32px 0;color:{};font-size:15px;border-radius:{};",
                c.primary, c.primary, c.secondary, theme.border_radius
            ),
            list_item: format!("{}display:flex;align-items:start;margin-bottom:12px;", paragraph),
            list_marker: format!(
                "font-weight:bold;color:{};margin-right:12px;min-width:20px;",
                c.accent
            ),
            list_bullet: format!(
                "color:{};margin-right:12px;font-size:1.2em;line-height:1;",
                c.accent
            ),
            inline_image: format!("{}margin:16px 0;", image),
            image,
            paragraph,
        }
    }
}
