use std::borrow::Cow;

use lsp_types::{Hover, HoverContents, MarkedString, MarkupContent, MarkupKind};

/// One unit of documentation text returned for a document position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverFragment {
	/// Plain text, used verbatim.
	Plain(String),
	/// Markdown-flavored text.
	Markdown(String),
	/// A language-tagged code snippet, usually the symbol signature.
	Code { language: String, value: String },
}

impl HoverFragment {
	/// Returns the fragment as markdown text.
	///
	/// Code snippets are wrapped in a fenced block so consumers that skip
	/// fenced code skip them too.
	pub fn text(&self) -> Cow<'_, str> {
		match self {
			Self::Plain(s) | Self::Markdown(s) => Cow::Borrowed(s),
			Self::Code { language, value } => Cow::Owned(format!("```{language}\n{value}\n```")),
		}
	}

	/// Returns true if the fragment carries no visible text.
	pub fn is_blank(&self) -> bool {
		match self {
			Self::Plain(s) | Self::Markdown(s) => s.trim().is_empty(),
			Self::Code { value, .. } => value.trim().is_empty(),
		}
	}
}

impl From<MarkedString> for HoverFragment {
	fn from(marked: MarkedString) -> Self {
		match marked {
			MarkedString::String(s) => Self::Markdown(s),
			MarkedString::LanguageString(ls) => Self::Code {
				language: ls.language,
				value: ls.value,
			},
		}
	}
}

impl From<MarkupContent> for HoverFragment {
	fn from(markup: MarkupContent) -> Self {
		match markup.kind {
			MarkupKind::PlainText => Self::Plain(markup.value),
			MarkupKind::Markdown => Self::Markdown(markup.value),
		}
	}
}

/// Flattens LSP hover contents into fragments, in server order.
pub fn fragments_from_hover(hover: Hover) -> Vec<HoverFragment> {
	match hover.contents {
		HoverContents::Scalar(marked) => vec![marked.into()],
		HoverContents::Array(parts) => parts.into_iter().map(Into::into).collect(),
		HoverContents::Markup(markup) => vec![markup.into()],
	}
}
