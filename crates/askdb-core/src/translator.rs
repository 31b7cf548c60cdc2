//! Question-to-SQL translation.
//!
//! Builds the fixed analyst prompt from the question and the live schema,
//! invokes the model once, and fence-strips the reply. No retries and no
//! validation that the output parses; a malformed statement surfaces when
//! the executor refuses or SQLite rejects it.

use crate::error::{AskDbError, Result};
use crate::llm::{strip_code_fences, TextGenerator};
use crate::schema::DatabaseSchema;
use log::debug;
use std::sync::Arc;

#[derive(Clone)]
pub struct QueryTranslator {
    generator: Arc<dyn TextGenerator>,
}

impl QueryTranslator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Translate a natural-language question into a SQLite statement,
    /// grounded on the rendered schema.
    pub async fn translate(&self, question: &str, schema: &DatabaseSchema) -> Result<String> {
        let prompt = build_prompt(question, schema);
        debug!("[TRANSLATE] Prompt built (len={})", prompt.len());

        let reply = self.generator.generate(&prompt).await?;
        let sql = strip_code_fences(&reply);
        if sql.is_empty() {
            return Err(AskDbError::Translation(
                "model returned an empty statement".to_string(),
            ));
        }

        debug!("[TRANSLATE] Generated SQL: {}", sql);
        Ok(sql)
    }
}

fn build_prompt(question: &str, schema: &DatabaseSchema) -> String {
    format!(
        "You are an expert SQLite data analyst. \
         Convert the question to a valid SQLite query based on the provided schema. \
         Only return the SQL query. \
         Schema:\n{}\nQuestion: \"{}\". SQL Query:",
        schema.to_prompt_text(),
        question
    )
}
