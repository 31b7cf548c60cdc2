//! Generative text model integration.
//!
//! The model is treated as an opaque text-in/text-out function behind the
//! [`TextGenerator`] trait so handlers and tests can swap in stubs. The
//! production implementation is [`gemini::GeminiClient`].

pub mod gemini;

use crate::error::Result;
use async_trait::async_trait;

pub use gemini::{GeminiClient, GeminiClientBuilder, DEFAULT_MODEL};

/// Opaque prompt-to-completion interface for a hosted generative model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Submit a prompt and return the raw text completion.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Strip markdown code-fence decoration from a model reply.
///
/// Removes every ```` ```sql ```` and ```` ``` ```` marker and trims
/// surrounding whitespace. Idempotent: stripping twice equals stripping once.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```sql", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_sql_fences() {
        let reply = "```sql\nSELECT SUM(total_sales) FROM total_sales\n```";
        assert_eq!(strip_code_fences(reply), "SELECT SUM(total_sales) FROM total_sales");
    }

    #[test]
    fn strips_bare_fences_and_whitespace() {
        let reply = "  ```\nSELECT 1\n```  ";
        assert_eq!(strip_code_fences(reply), "SELECT 1");
    }

    #[test]
    fn unfenced_reply_is_only_trimmed() {
        assert_eq!(strip_code_fences("\nSELECT 1  "), "SELECT 1");
    }

    #[test]
    fn stripping_is_idempotent() {
        let reply = "```sql\nSELECT * FROM ad_sales\n```";
        let once = strip_code_fences(reply);
        let twice = strip_code_fences(&once);
        assert_eq!(once, twice);
    }
}
