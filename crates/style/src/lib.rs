pub mod border;
pub mod chain;
pub mod effective;
pub mod font;
pub mod page;
pub mod parsers;
pub mod style;
pub mod text;

pub use border::{Border, BorderStyle};
pub use chain::StyleChain;
pub use effective::EffectiveStyle;
pub use font::{FontStyle, FontWeight};
pub use page::{Margins, PageGeometry, PageSize};
pub use parsers::StyleParseError;
pub use style::Style;
pub use text::{TextAlign, TextDecoration};
