use crate::models::CodeSnippet;

/// True when the case-folded term occurs in the question, slip number or
/// language label of `snippet`. The empty term matches everything.
pub fn matches(snippet: &CodeSnippet, term: &str) -> bool {
    let term = term.to_lowercase();
    snippet.question.to_lowercase().contains(&term)
        || snippet.slip_no.to_lowercase().contains(&term)
        || snippet.language.to_lowercase().contains(&term)
}

/// Stable filter: matching records in their original relative order
pub fn filter<'a>(snippets: &'a [CodeSnippet], term: &str) -> Vec<&'a CodeSnippet> {
    snippets.iter().filter(|s| matches(s, term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fake::snippet;

    fn catalog() -> Vec<CodeSnippet> {
        vec![
            snippet(1, "5", "sum of two numbers", "java"),
            snippet(2, "12", "Reverse a String", "Python"),
            snippet(3, "A7", "binary search", "C++"),
            snippet(4, "8", "fizzbuzz", "javascript"),
        ]
    }

    #[test]
    fn single_record_scenario() {
        let records = vec![snippet(1, "5", "sum of two numbers", "java")];

        assert_eq!(filter(&records, "java").len(), 1);
        assert!(filter(&records, "python").is_empty());
        assert_eq!(filter(&records, "5").len(), 1);
    }

    #[test]
    fn empty_term_is_identity() {
        let records = catalog();
        let all: Vec<&CodeSnippet> = records.iter().collect();

        assert_eq!(filter(&records, ""), all);
    }

    #[test]
    fn matching_is_case_insensitive_on_every_field() {
        let records = catalog();

        assert_eq!(filter(&records, "REVERSE").len(), 1);
        assert_eq!(filter(&records, "python").len(), 1);
        assert_eq!(filter(&records, "a7")[0].question, "binary search");
    }

    #[test]
    fn code_body_is_not_searched() {
        let records = catalog();

        assert!(filter(&records, "// snippet").is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let records = catalog();
        let hits: Vec<_> = filter(&records, "java")
            .iter()
            .map(|s| s.slip_no.as_str())
            .collect();

        assert_eq!(hits, vec!["5", "8"]);
    }

    #[test]
    fn filter_partitions_records_by_the_predicate() {
        let records = catalog();
        for term in ["a", "s", "1", "java", "zzz", "++"] {
            let hits = filter(&records, term);
            for record in &records {
                let hit = hits.iter().any(|h| std::ptr::eq(*h, record));
                assert_eq!(hit, matches(record, term), "term {:?}", term);
            }
        }
    }
}
