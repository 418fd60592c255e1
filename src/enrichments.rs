use crate::category::Category;

/// Badge shown for a recognized provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderBadge {
    pub label: String,
    pub logo: String,
}

impl ProviderBadge {
    fn new(label: &str, logo: &str) -> Self {
        Self {
            label: label.to_string(),
            logo: logo.to_string(),
        }
    }

    pub fn community() -> Self {
        Self::new("Community", "🌐")
    }
}

/// Static display data injected into the renderer and the apps: an ordered
/// provider-keyword table and per-category use-case prompts. Kept as an
/// explicit value rather than globals so tests can swap in their own.
#[derive(Debug, Clone)]
pub struct Enrichments {
    /// Lowercase keyword -> badge. A `Vec` because lookup order is part of
    /// the contract: the first matching keyword wins.
    pub providers: Vec<(String, ProviderBadge)>,
    pub use_cases: Vec<(Category, Vec<String>)>,
}

impl Enrichments {
    pub fn builtin() -> Self {
        let providers = vec![
            ("google".to_string(), ProviderBadge::new("Google", "🟦")),
            ("meta".to_string(), ProviderBadge::new("Meta", "🔵")),
            ("microsoft".to_string(), ProviderBadge::new("Microsoft", "🟩")),
            ("mistral".to_string(), ProviderBadge::new("Mistral", "🌀")),
            ("deepseek".to_string(), ProviderBadge::new("DeepSeek", "🧠")),
            ("openai".to_string(), ProviderBadge::new("OpenAI", "✨")),
            ("anthropic".to_string(), ProviderBadge::new("Anthropic", "🧭")),
            ("qwen".to_string(), ProviderBadge::new("Qwen", "🟠")),
        ];

        let use_cases = vec![
            (
                Category::Writing,
                prompts(&[
                    "✍️ Write a cover letter",
                    "📰 Draft a blog post",
                    "📧 Rewrite emails professionally",
                    "🧠 Brainstorm social captions",
                ]),
            ),
            (
                Category::Coding,
                prompts(&[
                    "💻 Debug my code",
                    "🧪 Generate test cases",
                    "⚙️ Explain complex functions",
                    "🚀 Scaffold a new feature",
                ]),
            ),
            (
                Category::Learning,
                prompts(&[
                    "📚 Explain topics simply",
                    "📝 Summarize long documents",
                    "🎯 Create study flashcards",
                    "🔍 Answer follow-up questions",
                ]),
            ),
            (
                Category::Business,
                prompts(&[
                    "📊 Analyze customer feedback",
                    "🧾 Draft proposals",
                    "🗂️ Build meeting notes",
                    "📈 Plan GTM strategy",
                ]),
            ),
            (
                Category::Creative,
                prompts(&[
                    "🎨 Invent campaign ideas",
                    "🎬 Script a short video",
                    "🎵 Generate lyric concepts",
                    "🕹️ Create game story arcs",
                ]),
            ),
        ];

        Self {
            providers,
            use_cases,
        }
    }

    pub fn use_cases_for(&self, category: Category) -> &[String] {
        self.use_cases
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, prompts)| prompts.as_slice())
            .unwrap_or(&[])
    }
}

fn prompts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
