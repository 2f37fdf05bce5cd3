pub mod article;
pub mod error;
pub mod fetch;
pub mod infobox;
pub mod metadata;
pub mod parse;
pub mod preprocess;
pub mod sections;
pub mod sectioner;

pub use article::{EMPTY_INTRO_PLACEHOLDER, OutputFormat, SectionedArticle};
pub use error::{Result, WikifoldError};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, fetch_article, fetch_url};
pub use fetch::{fetch_file, fetch_stdin};
#[doc(hidden)]
pub use infobox::InfoboxConfig;
pub use infobox::{InfoboxExtract, InfoboxImage, extract_infobox, extract_infobox_with_config};
pub use metadata::PageMeta;
pub use parse::Document;
#[doc(hidden)]
pub use preprocess::PreprocessConfig;
pub use preprocess::preprocess_html;
pub use sections::{
    FALLBACK_HEADING, INFOBOX_SECTION_ID, INTRO_SECTION_ID, IntroSplit, Section, extract_intro, split_into_sections,
};
#[cfg(feature = "fetch")]
pub use sectioner::{fetch_and_section, fetch_and_section_with_config};
pub use sectioner::{
    SectionConfig, SectionConfigBuilder, Sectioner, section_article, section_article_with_config,
};
