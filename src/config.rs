//! Application settings, fixed at build time.
//!
//! | variable                 | default      |
//! |--------------------------|--------------|
//! | `ORG_DIRECTORY_URL`      | `/api/users` |
//! | `ORG_PHOTO_URL_TEMPLATE` | unset        |
//! | `ORG_GRAPH_VARIANT`      | `click`      |

use std::sync::Arc;

use log::warn;

use crate::components::org_chart::GraphConfig;
use crate::images::{ImageRetriever, NoImages, TemplateImageRetriever};

const DEFAULT_DIRECTORY_URL: &str = "/api/users";

/// Settings for one build of the app.
#[derive(Clone, Debug)]
pub struct AppConfig {
	/// Directory endpoint; a leading `/` is resolved against the page origin.
	pub directory_url: String,
	/// Photo URL template, see [`TemplateImageRetriever`].
	pub photo_url_template: Option<String>,
	/// Graph variant and tunables.
	pub graph: GraphConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			directory_url: DEFAULT_DIRECTORY_URL.to_string(),
			photo_url_template: None,
			graph: GraphConfig::default(),
		}
	}
}

impl AppConfig {
	/// Settings baked in from the build environment.
	pub fn from_build_env() -> Self {
		Self::from_values(
			option_env!("ORG_DIRECTORY_URL"),
			option_env!("ORG_PHOTO_URL_TEMPLATE"),
			option_env!("ORG_GRAPH_VARIANT"),
		)
	}

	/// Settings from raw variable values; `None` takes the default.
	pub fn from_values(
		directory_url: Option<&str>,
		photo_url_template: Option<&str>,
		variant: Option<&str>,
	) -> Self {
		let graph = match variant.map(str::trim) {
			None | Some("") | Some("click") => GraphConfig::default(),
			Some("hover") => GraphConfig::hover_compact(),
			Some(other) => {
				warn!("unknown graph variant {other:?}, using click");
				GraphConfig::default()
			}
		};
		Self {
			directory_url: directory_url
				.filter(|u| !u.trim().is_empty())
				.unwrap_or(DEFAULT_DIRECTORY_URL)
				.to_string(),
			photo_url_template: photo_url_template
				.filter(|t| !t.trim().is_empty())
				.map(str::to_string),
			graph,
		}
	}

	/// Absolute directory URL for a page served from `origin`.
	pub fn directory_url_for(&self, origin: &str) -> String {
		if self.directory_url.starts_with('/') {
			format!("{}{}", origin.trim_end_matches('/'), self.directory_url)
		} else {
			self.directory_url.clone()
		}
	}

	/// Photo lookup for the configured template, or none.
	pub fn image_retriever(&self) -> Arc<dyn ImageRetriever> {
		match &self.photo_url_template {
			Some(template) => Arc::new(TemplateImageRetriever::new(template.clone())),
			None => Arc::new(NoImages),
		}
	}
}
