//! Profile photo lookup.

/// Resolves an employee's email address to a photo URL.
pub trait ImageRetriever: Send + Sync {
	/// Photo URL, or `None` when no photo is available.
	fn image_url(&self, email: &str) -> Option<String>;
}

/// Never has a photo.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoImages;

impl ImageRetriever for NoImages {
	fn image_url(&self, _email: &str) -> Option<String> {
		None
	}
}

/// Builds photo URLs from a template such as
/// `https://photos.example.com/{user}.jpg` or `/avatar?email={email}`.
///
/// `{email}` is the URL-encoded address, `{user}` its local part.
#[derive(Clone, Debug)]
pub struct TemplateImageRetriever {
	template: String,
}

impl TemplateImageRetriever {
	/// Retriever filling `{email}` and `{user}` in `template`.
	pub fn new(template: impl Into<String>) -> Self {
		Self {
			template: template.into(),
		}
	}
}

impl ImageRetriever for TemplateImageRetriever {
	fn image_url(&self, email: &str) -> Option<String> {
		let email = email.trim();
		if email.is_empty() || self.template.is_empty() {
			return None;
		}
		let user = email.split('@').next().unwrap_or(email);
		Some(
			self.template
				.replace("{email}", &urlencoding::encode(email))
				.replace("{user}", &urlencoding::encode(user)),
		)
	}
}
