//! Employee directory fetch.

use std::sync::Arc;

use log::info;
use thiserror::Error;

use crate::components::org_chart::Employee;

/// Why the directory could not be loaded. Cloneable so it can live in a
/// signal.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
	/// The request never produced a readable response.
	#[error("failed to fetch directory from {url}: {source}")]
	Fetch {
		/// Directory endpoint.
		url: String,
		/// Transport error.
		#[source]
		source: Arc<reqwest::Error>,
	},
	/// Non-success HTTP status.
	#[error("directory at {url} answered with HTTP {status}")]
	Status {
		/// Directory endpoint.
		url: String,
		/// HTTP status code.
		status: u16,
	},
	/// The body is not a JSON employee array.
	#[error("directory at {url} is not a valid employee list: {source}")]
	Decode {
		/// Directory endpoint.
		url: String,
		/// JSON error.
		#[source]
		source: Arc<serde_json::Error>,
	},
}

/// Client for the directory endpoint, which serves a JSON array of employees.
#[derive(Clone, Debug)]
pub struct Directory {
	url: String,
	client: reqwest::Client,
}

impl Directory {
	/// Client for the directory at `url`.
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			client: reqwest::Client::new(),
		}
	}

	/// Fetches every employee, keeping only those accepted by `filter`.
	/// Any network, status or decode failure fails the whole fetch.
	pub async fn get_users<F>(&self, filter: Option<F>) -> Result<Vec<Employee>, DirectoryError>
	where
		F: Fn(&Employee) -> bool,
	{
		let fetch_err = |e: reqwest::Error| DirectoryError::Fetch {
			url: self.url.clone(),
			source: Arc::new(e),
		};
		let response = self.client.get(&self.url).send().await.map_err(fetch_err)?;
		let status = response.status();
		if !status.is_success() {
			return Err(DirectoryError::Status {
				url: self.url.clone(),
				status: status.as_u16(),
			});
		}
		let body = response.text().await.map_err(fetch_err)?;
		let users = parse_users(&self.url, &body)?;
		info!("directory: loaded {} employees from {}", users.len(), self.url);
		Ok(apply_filter(users, filter))
	}
}

/// Decodes a directory response body.
pub fn parse_users(url: &str, body: &str) -> Result<Vec<Employee>, DirectoryError> {
	serde_json::from_str(body).map_err(|e| DirectoryError::Decode {
		url: url.to_string(),
		source: Arc::new(e),
	})
}

/// Keeps the users `filter` accepts; `None` keeps everyone.
pub fn apply_filter<F>(users: Vec<Employee>, filter: Option<F>) -> Vec<Employee>
where
	F: Fn(&Employee) -> bool,
{
	match filter {
		Some(keep) => users.into_iter().filter(|e| keep(e)).collect(),
		None => users,
	}
}
