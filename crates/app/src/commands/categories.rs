//! The `chemquiz categories` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quiz_core::model::QuizCategory;
use services::{Clock, QuestionBank};

use crate::config::AppConfig;

pub async fn execute(config: &AppConfig) -> Result<()> {
    let services = config.build_services(Clock::default_clock()).await?;
    println!("{}", category_table(&services.questions()));
    Ok(())
}

pub fn category_table(bank: &QuestionBank) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Id", "Category", "Questions", "Description"]);
    for category in QuizCategory::ALL {
        table.add_row(vec![
            Cell::new(category.as_str()),
            Cell::new(category.title()),
            Cell::new(bank.count(category)),
            Cell::new(category.description()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_category_with_counts() {
        let bank = QuestionBank::bundled().unwrap();
        let rendered = category_table(&bank).to_string();
        for category in QuizCategory::ALL {
            assert!(rendered.contains(category.as_str()));
        }
        assert_eq!(category_table(&bank).row_iter().count(), QuizCategory::ALL.len());
    }
}
