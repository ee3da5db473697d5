//! The report definition and its builder.
//!
//! A definition is immutable once built and can be shared across threads and
//! rendered any number of times. Building validates it, so a definition that
//! exists is one the layout engine can always start on.

use crate::band::{BandDefinition, BandRole, ReportBands};
use crate::error::DefinitionError;
use crate::group::GroupDefinition;
use folio_style::{Margins, PageGeometry, PageSize, Style, StyleChain};
use folio_types::Rect;
use folio_types::units::cm;
use serde::Deserialize;

/// Tolerance used when comparing widths against the content area.
const WIDTH_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ReportTemplate")]
pub struct ReportDefinition {
    pub title: String,
    pub author: String,
    pub page_size: PageSize,
    pub margins: Margins,
    /// Report-level styles, least specific first. A derived report appends
    /// its own level to the chain of the report it extends.
    pub style_chain: StyleChain,
    pub bands: ReportBands,
    /// Outermost level first.
    pub groups: Vec<GroupDefinition>,
    /// Render begin and summary bands even when there are no records.
    pub print_if_empty: bool,
}

impl ReportDefinition {
    pub fn builder() -> ReportBuilder {
        ReportBuilder::new()
    }

    /// Parses and validates a definition from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let template: ReportTemplate = serde_json::from_str(json)?;
        Self::try_from(template)
    }

    pub fn page_geometry(&self) -> PageGeometry {
        PageGeometry::new(self.page_size, self.margins)
    }

    /// The printable area of a page.
    pub fn page_rect(&self) -> Rect {
        self.page_geometry().content_rect()
    }

    /// Checks every structural rule. Called by the builder, and again by the
    /// layout engine since the fields are public.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if !self.groups.is_empty() && self.bands.detail.is_none() {
            return Err(DefinitionError::MissingDetailBand {
                groups: self.groups.len(),
            });
        }

        let geometry = self.page_geometry();
        let content_width = geometry.content_width();

        for (role, band) in self.bands.iter() {
            validate_band(role, band, content_width)?;
            if matches!(role, BandRole::PageHeader | BandRole::PageFooter) && has_subreports(band) {
                return Err(DefinitionError::SubReportInPageBand { band: role });
            }
        }
        for (level, group) in self.groups.iter().enumerate() {
            if let Some(header) = &group.header {
                validate_band(BandRole::GroupHeader(level), header, content_width)?;
            }
            if let Some(footer) = &group.footer {
                validate_band(BandRole::GroupFooter(level), footer, content_width)?;
            }
        }

        let (header, footer) = self.bands.page_chrome_height();
        let available = geometry.content_height();
        if header + footer > 0.0 && header + footer >= available {
            return Err(DefinitionError::PageBandsOverlap {
                header,
                footer,
                available,
            });
        }
        Ok(())
    }
}

fn has_subreports(band: &BandDefinition) -> bool {
    !band.subreports.is_empty() || band.child_bands.iter().any(has_subreports)
}

fn validate_band(
    role: BandRole,
    band: &BandDefinition,
    content_width: f32,
) -> Result<(), DefinitionError> {
    if !band.height.is_finite() || band.height < 0.0 {
        return Err(DefinitionError::InvalidBandHeight {
            band: role,
            height: band.height,
        });
    }

    let width = band.resolved_width(content_width);
    if !width.is_finite() || width < 0.0 || width > content_width + WIDTH_EPSILON {
        return Err(DefinitionError::BandTooWide {
            band: role,
            width,
            available: content_width,
        });
    }

    for (index, element) in band.elements.iter().enumerate() {
        let invalid = |reason: String| DefinitionError::InvalidElement {
            band: role,
            index,
            reason,
        };
        if element.x < 0.0 || element.y < 0.0 {
            return Err(invalid(format!(
                "negative offset ({:.2}, {:.2})",
                element.x, element.y
            )));
        }
        let w = element.width.resolve(element.x, width);
        let h = element.height.resolve(element.y, band.height);
        if w < 0.0 || h < 0.0 {
            return Err(invalid(format!("negative size {:.2}x{:.2}", w, h)));
        }
        if element.x + w > width + WIDTH_EPSILON || element.y + h > band.height + WIDTH_EPSILON {
            log::warn!(
                "{} element #{} of the {} band extends outside the band ({:.2}x{:.2} at {:.2},{:.2} in {:.2}x{:.2})",
                element.content.name(),
                index,
                role,
                w,
                h,
                element.x,
                element.y,
                width,
                band.height
            );
        }
    }

    for child in &band.child_bands {
        validate_band(BandRole::Child, child, content_width)?;
    }
    for subreport in &band.subreports {
        subreport.report.validate()?;
    }
    Ok(())
}

/// Builds a [`ReportDefinition`]. Defaults: A4 portrait, 1cm margins, no
/// bands, no groups.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    definition: ReportDefinition,
    default_style: Option<Style>,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self {
            definition: ReportDefinition {
                title: String::new(),
                author: String::new(),
                page_size: PageSize::A4,
                margins: Margins::all(cm(1.0)),
                style_chain: StyleChain::new(),
                bands: ReportBands::default(),
                groups: Vec::new(),
                print_if_empty: false,
            },
            default_style: None,
        }
    }

    /// Starts from a copy of `base`. Anything set on the builder overrides the
    /// base; a default style becomes a new, more specific level of the base's
    /// style chain.
    pub fn extending(base: &ReportDefinition) -> Self {
        Self {
            definition: base.clone(),
            default_style: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.definition.title = title.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.definition.author = author.into();
        self
    }

    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.definition.page_size = page_size;
        self
    }

    pub fn landscape(mut self) -> Self {
        self.definition.page_size = self.definition.page_size.landscape();
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.definition.margins = margins;
        self
    }

    pub fn default_style(mut self, style: Style) -> Self {
        self.default_style = Some(style);
        self
    }

    pub fn begin(mut self, band: BandDefinition) -> Self {
        self.definition.bands.begin = Some(band);
        self
    }

    pub fn page_header(mut self, band: BandDefinition) -> Self {
        self.definition.bands.page_header = Some(band);
        self
    }

    pub fn page_footer(mut self, band: BandDefinition) -> Self {
        self.definition.bands.page_footer = Some(band);
        self
    }

    pub fn detail(mut self, band: BandDefinition) -> Self {
        self.definition.bands.detail = Some(band);
        self
    }

    pub fn summary(mut self, band: BandDefinition) -> Self {
        self.definition.bands.summary = Some(band);
        self
    }

    /// Adds a grouping level nested inside the ones already added.
    pub fn group(mut self, group: GroupDefinition) -> Self {
        self.definition.groups.push(group);
        self
    }

    pub fn print_if_empty(mut self, print_if_empty: bool) -> Self {
        self.definition.print_if_empty = print_if_empty;
        self
    }

    pub fn build(self) -> Result<ReportDefinition, DefinitionError> {
        let mut definition = self.definition;
        if let Some(style) = self.default_style {
            definition.style_chain.push(style);
        }
        definition.validate()?;
        log::debug!(
            "Built report definition '{}' ({} style level(s), {} group(s))",
            definition.title,
            definition.style_chain.len(),
            definition.groups.len()
        );
        Ok(definition)
    }
}

/// The JSON form of a definition.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ReportTemplate {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    page_size: PageSize,
    #[serde(default)]
    landscape: bool,
    #[serde(default)]
    margins: Option<Margins>,
    #[serde(default)]
    style_chain: StyleChain,
    #[serde(default)]
    default_style: Option<Style>,
    #[serde(default)]
    bands: ReportBands,
    #[serde(default)]
    groups: Vec<GroupDefinition>,
    #[serde(default)]
    print_if_empty: bool,
}

impl TryFrom<ReportTemplate> for ReportDefinition {
    type Error = DefinitionError;

    fn try_from(template: ReportTemplate) -> Result<Self, Self::Error> {
        let mut builder = ReportBuilder::new()
            .title(template.title)
            .author(template.author)
            .page_size(template.page_size)
            .print_if_empty(template.print_if_empty);
        if template.landscape {
            builder = builder.landscape();
        }
        if let Some(margins) = template.margins {
            builder = builder.margins(margins);
        }
        if let Some(style) = template.default_style {
            builder = builder.default_style(style);
        }
        builder.definition.style_chain = template.style_chain;
        builder.definition.bands = template.bands;
        builder.definition.groups = template.groups;
        builder.build()
    }
}
