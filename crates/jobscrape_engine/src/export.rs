use jobscrape_core::JobRecord;
use serde::Serialize;

pub const CSV_HEADER: [&str; 9] = [
    "Title",
    "Company",
    "Date",
    "Link",
    "Description Length",
    "Skills",
    "Place",
    "Location",
    "Query",
];

/// One output row, in `CSV_HEADER` order.
#[derive(Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    company: &'a str,
    date: &'a str,
    link: &'a str,
    description_length: usize,
    skills: String,
    place: &'a str,
    location: &'a str,
    query: &'a str,
}

impl<'a> CsvRow<'a> {
    fn from_record(record: &'a JobRecord) -> Self {
        Self {
            title: record.title(),
            company: record.company(),
            date: record.posted_date(),
            link: record.link(),
            description_length: record.description_length(),
            skills: format_skills(record.skills()),
            place: record.place(),
            location: record.location(),
            query: record.source_query(),
        }
    }
}

/// Render the header row plus one row per record.
pub fn encode_records(records: &[JobRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(CsvRow::from_record(record))?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

/// Skills are written as a list literal, e.g. `['SQL', 'Python']`.
fn format_skills(skills: &[String]) -> String {
    let items: Vec<String> = skills.iter().map(|s| quote_skill(s)).collect();
    format!("[{}]", items.join(", "))
}

fn quote_skill(skill: &str) -> String {
    if skill.contains('\'') && !skill.contains('"') {
        format!("\"{}\"", skill.replace('\\', "\\\\"))
    } else {
        format!(
            "'{}'",
            skill.replace('\\', "\\\\").replace('\'', "\\'")
        )
    }
}

#[cfg(test)]
mod tests {
    use jobscrape_core::{JobRecord, RawJobPosting};

    use super::{encode_records, format_skills};

    fn record(title: &str, place: &str) -> JobRecord {
        JobRecord::from_posting(RawJobPosting {
            title: Some(title.to_string()),
            company: Some("Acme".to_string()),
            date: Some("2024-05-01".to_string()),
            link: Some("https://jobs.example.com/view/1".to_string()),
            description: Some("abc".to_string()),
            skills: None,
            place: Some(place.to_string()),
            location: Some("Ahmedabad".to_string()),
            query: Some("data".to_string()),
            ..RawJobPosting::default()
        })
        .unwrap()
    }

    fn encode(records: &[JobRecord]) -> String {
        String::from_utf8(encode_records(records).unwrap()).unwrap()
    }

    #[test]
    fn empty_input_writes_header_only() {
        assert_eq!(
            encode(&[]),
            "Title,Company,Date,Link,Description Length,Skills,Place,Location,Query\n"
        );
    }

    #[test]
    fn plain_fields_are_not_quoted() {
        let out = encode(&[record("Analyst", "Remote")]);
        assert_eq!(
            out.lines().nth(1),
            Some("Analyst,Acme,2024-05-01,https://jobs.example.com/view/1,3,[],Remote,Ahmedabad,data")
        );
    }

    #[test]
    fn separators_quotes_and_newlines_are_escaped() {
        let out = encode(&[record("say \"hi\"\nnow", "Pune, India")]);
        assert!(out.contains("\"say \"\"hi\"\"\nnow\",Acme,"));
        assert!(out.contains(",\"Pune, India\",Ahmedabad,"));
    }

    #[test]
    fn skills_render_as_list_literal() {
        assert_eq!(format_skills(&[]), "[]");
        assert_eq!(
            format_skills(&["SQL".to_string(), "Python".to_string()]),
            "['SQL', 'Python']"
        );
        assert_eq!(
            format_skills(&["Developer's toolkit".to_string()]),
            "[\"Developer's toolkit\"]"
        );
    }
}
