/// Two-letter node label: initial of the first and second space-separated
/// tokens. An empty first token shows as `?`, a missing second token adds
/// nothing, and an empty name has no label at all.
pub fn name_abbreviation(display_name: &str) -> Option<String> {
	if display_name.is_empty() {
		return None;
	}
	let mut tokens = display_name.split(' ');
	let first = tokens.next().and_then(|t| t.chars().next()).unwrap_or('?');
	let second = tokens.next().and_then(|t| t.chars().next());

	let mut label = String::with_capacity(2);
	label.push(first);
	label.extend(second);
	Some(label)
}
