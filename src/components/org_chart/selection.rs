use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::images::ImageRetriever;

use super::grouping::location_label;
use super::types::Employee;

/// Everything `encodeURI` escapes: URI delimiters such as `@`, `+` and `?`
/// pass through.
const MAILTO: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')')
	.remove(b';')
	.remove(b'/')
	.remove(b'?')
	.remove(b':')
	.remove(b'@')
	.remove(b'&')
	.remove(b'=')
	.remove(b'+')
	.remove(b'$')
	.remove(b',')
	.remove(b'#');

/// Field values shown in the detail panel for the selected employee.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailPanel {
	/// Display name.
	pub name: String,
	/// Job title.
	pub job_title: String,
	/// Department.
	pub department: String,
	/// `"{city}, {state}"`, same format as location grouping.
	pub location: String,
	/// Office telephone number.
	pub phone: String,
	/// Present only when the view is configured to show mobile numbers.
	pub mobile: Option<String>,
	/// Email address as shown.
	pub email: String,
	/// `mailto:` link for `email`.
	pub mailto: String,
	/// `None` hides the photo element.
	pub photo_url: Option<String>,
}

impl DetailPanel {
	/// Maps an employee onto the panel slots. Missing fields become empty.
	pub fn for_employee(
		employee: &Employee,
		images: &dyn ImageRetriever,
		include_mobile: bool,
	) -> Self {
		let text = |field: &Option<String>| field.clone().unwrap_or_default();
		let email = text(&employee.email);
		Self {
			name: text(&employee.display_name),
			job_title: text(&employee.job_title),
			department: text(&employee.department),
			location: location_label(employee.city.as_deref(), employee.state.as_deref()),
			phone: text(&employee.telephone_number),
			mobile: include_mobile.then(|| text(&employee.mobile_number)),
			mailto: format!("mailto:{}", utf8_percent_encode(&email, MAILTO)),
			photo_url: images.image_url(&email).filter(|url| !url.is_empty()),
			email,
		}
	}
}

/// Selection flag per node; at most one is set.
pub fn selection_flags(node_count: usize, selected: Option<usize>) -> Vec<bool> {
	(0..node_count).map(|i| Some(i) == selected).collect()
}
