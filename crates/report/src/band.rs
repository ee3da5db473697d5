use crate::element::Element;
use crate::subreport::SubReport;
use folio_style::{Style, parsers};
use serde::Deserialize;
use std::fmt;

/// Where a band sits in the report. Used for error messages, logging and by
/// the layout engine to decide when a band is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandRole {
    Begin,
    PageHeader,
    PageFooter,
    Detail,
    GroupHeader(usize),
    GroupFooter(usize),
    Summary,
    Child,
}

impl fmt::Display for BandRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandRole::Begin => f.write_str("begin"),
            BandRole::PageHeader => f.write_str("page header"),
            BandRole::PageFooter => f.write_str("page footer"),
            BandRole::Detail => f.write_str("detail"),
            BandRole::GroupHeader(level) => write!(f, "group #{} header", level),
            BandRole::GroupFooter(level) => write!(f, "group #{} footer", level),
            BandRole::Summary => f.write_str("summary"),
            BandRole::Child => f.write_str("child"),
        }
    }
}

/// A horizontal strip of the page with a fixed height and a set of
/// positioned elements.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BandDefinition {
    #[serde(deserialize_with = "parsers::deserialize_length")]
    pub height: f32,
    /// Defaults to the page content width.
    #[serde(default, deserialize_with = "parsers::deserialize_opt_length")]
    pub width: Option<f32>,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub subreports: Vec<SubReport>,
    /// Rendered right after this band, each with its own height.
    #[serde(default)]
    pub child_bands: Vec<BandDefinition>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Start a new page before this band is placed.
    #[serde(default)]
    pub force_new_page: bool,
    #[serde(default)]
    pub default_style: Style,
}

fn default_visible() -> bool {
    true
}

impl BandDefinition {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            width: None,
            elements: Vec::new(),
            subreports: Vec::new(),
            child_bands: Vec::new(),
            visible: true,
            force_new_page: false,
            default_style: Style::default(),
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn elements(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        self.elements.extend(elements);
        self
    }

    pub fn subreport(mut self, subreport: SubReport) -> Self {
        self.subreports.push(subreport);
        self
    }

    pub fn child(mut self, band: BandDefinition) -> Self {
        self.child_bands.push(band);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn force_new_page(mut self) -> Self {
        self.force_new_page = true;
        self
    }

    pub fn default_style(mut self, style: Style) -> Self {
        self.default_style = style;
        self
    }

    /// The width this band occupies given the page content width.
    pub fn resolved_width(&self, content_width: f32) -> f32 {
        self.width.unwrap_or(content_width)
    }

    /// Height of the band plus all visible child bands, ignoring sub-reports.
    pub fn total_height(&self) -> f32 {
        self.height
            + self
                .child_bands
                .iter()
                .filter(|c| c.visible)
                .map(BandDefinition::total_height)
                .sum::<f32>()
    }
}

/// The fixed-role bands of a report. Every one is optional.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReportBands {
    #[serde(default)]
    pub begin: Option<BandDefinition>,
    #[serde(default)]
    pub page_header: Option<BandDefinition>,
    #[serde(default)]
    pub page_footer: Option<BandDefinition>,
    #[serde(default)]
    pub detail: Option<BandDefinition>,
    #[serde(default)]
    pub summary: Option<BandDefinition>,
}

impl ReportBands {
    pub fn get(&self, role: BandRole) -> Option<&BandDefinition> {
        match role {
            BandRole::Begin => self.begin.as_ref(),
            BandRole::PageHeader => self.page_header.as_ref(),
            BandRole::PageFooter => self.page_footer.as_ref(),
            BandRole::Detail => self.detail.as_ref(),
            BandRole::Summary => self.summary.as_ref(),
            _ => None,
        }
    }

    /// The declared bands in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = (BandRole, &BandDefinition)> {
        [
            (BandRole::Begin, &self.begin),
            (BandRole::PageHeader, &self.page_header),
            (BandRole::Detail, &self.detail),
            (BandRole::Summary, &self.summary),
            (BandRole::PageFooter, &self.page_footer),
        ]
        .into_iter()
        .filter_map(|(role, band)| band.as_ref().map(|b| (role, b)))
    }

    /// Vertical space the page header and footer take on every page.
    pub fn page_chrome_height(&self) -> (f32, f32) {
        let visible_height = |b: &Option<BandDefinition>| {
            b.as_ref()
                .filter(|b| b.visible)
                .map_or(0.0, BandDefinition::total_height)
        };
        (visible_height(&self.page_header), visible_height(&self.page_footer))
    }
}
