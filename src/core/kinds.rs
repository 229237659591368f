use crate::core::fallback;
use crate::core::normalize::{
    format_flag, format_metrics, join_list, parse_flag, parse_metrics, split_list,
};
use crate::domain::model::{DownloadRecord, ExperienceRecord, ProjectRecord, RawRow, Skill};
use crate::domain::ports::RecordKind;

pub struct Experiences;
pub struct Skills;
pub struct Projects;
pub struct Downloads;

impl RecordKind for Experiences {
    type Record = ExperienceRecord;

    const NAME: &'static str = "experiences";
    const SHEET_NAME: &'static str = "Experiences";
    const SHEET_GID: u32 = 0;
    const API_RANGE: &'static str = "Experiences!A1:H100";
    const BUNDLE_FILE: &'static str = "experiences.csv";
    const HEADERS: &'static [&'static str] = &[
        "title",
        "company",
        "location",
        "period",
        "type",
        "description",
        "achievements",
        "technologies",
    ];

    fn from_row(row: &RawRow) -> Option<ExperienceRecord> {
        let title = row.get("title").trim();
        let company = row.get("company").trim();
        if title.is_empty() || company.is_empty() {
            return None;
        }

        Some(ExperienceRecord {
            title: title.to_string(),
            company: company.to_string(),
            location: row.get("location").to_string(),
            period: row.get("period").to_string(),
            employment_type: row.get("type").to_string(),
            description: row.get("description").to_string(),
            achievements: split_list(row.get("achievements")),
            technologies: split_list(row.get("technologies")),
        })
    }

    fn to_fields(record: &ExperienceRecord) -> Vec<String> {
        vec![
            record.title.clone(),
            record.company.clone(),
            record.location.clone(),
            record.period.clone(),
            record.employment_type.clone(),
            record.description.clone(),
            join_list(&record.achievements),
            join_list(&record.technologies),
        ]
    }

    fn fallback() -> Vec<ExperienceRecord> {
        fallback::experiences()
    }
}

impl RecordKind for Skills {
    type Record = Skill;

    const NAME: &'static str = "skills";
    const SHEET_NAME: &'static str = "Skills";
    const SHEET_GID: u32 = 1;
    const API_RANGE: &'static str = "Skills!A1:C100";
    const BUNDLE_FILE: &'static str = "skills.csv";
    const HEADERS: &'static [&'static str] = &["skill"];

    fn from_row(row: &RawRow) -> Option<Skill> {
        ["skill", "name", "Skill"]
            .iter()
            .map(|column| row.get(column).trim())
            .find(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn to_fields(record: &Skill) -> Vec<String> {
        vec![record.clone()]
    }

    fn fallback() -> Vec<Skill> {
        fallback::skills()
    }
}

impl RecordKind for Projects {
    type Record = ProjectRecord;

    const NAME: &'static str = "projects";
    const SHEET_NAME: &'static str = "Projects";
    const SHEET_GID: u32 = 2;
    const API_RANGE: &'static str = "Projects!A1:L100";
    const BUNDLE_FILE: &'static str = "projects.csv";
    const HEADERS: &'static [&'static str] = &[
        "title",
        "description",
        "category",
        "year",
        "tags",
        "github",
        "live",
        "status",
        "featured",
        "metrics",
        "image",
    ];

    fn from_row(row: &RawRow) -> Option<ProjectRecord> {
        Some(ProjectRecord {
            title: row.get("title").to_string(),
            description: row.get("description").to_string(),
            category: row.get("category").to_string(),
            year: row.get("year").to_string(),
            tags: split_list(row.get("tags")),
            github: row.get("github").to_string(),
            live: row.get("live").to_string(),
            status: row.get("status").to_string(),
            featured: parse_flag(row.get("featured")),
            metrics: parse_metrics(row.get("metrics")),
            image: row.get("image").to_string(),
        })
    }

    fn to_fields(record: &ProjectRecord) -> Vec<String> {
        vec![
            record.title.clone(),
            record.description.clone(),
            record.category.clone(),
            record.year.clone(),
            join_list(&record.tags),
            record.github.clone(),
            record.live.clone(),
            record.status.clone(),
            format_flag(record.featured),
            format_metrics(&record.metrics),
            record.image.clone(),
        ]
    }

    fn fallback() -> Vec<ProjectRecord> {
        fallback::projects()
    }
}

impl RecordKind for Downloads {
    type Record = DownloadRecord;

    const NAME: &'static str = "downloads";
    const SHEET_NAME: &'static str = "Download";
    const SHEET_GID: u32 = 3;
    const API_RANGE: &'static str = "Download!A1:E100";
    const BUNDLE_FILE: &'static str = "download.csv";
    const HEADERS: &'static [&'static str] = &["label", "url", "filename", "version", "updated"];

    fn from_row(row: &RawRow) -> Option<DownloadRecord> {
        Some(DownloadRecord {
            label: row.get("label").to_string(),
            url: row.get("url").to_string(),
            filename: row.get("filename").to_string(),
            version: row.get("version").to_string(),
            updated: row.get("updated").to_string(),
        })
    }

    fn to_fields(record: &DownloadRecord) -> Vec<String> {
        vec![
            record.label.clone(),
            record.url.clone(),
            record.filename.clone(),
            record.version.clone(),
            record.updated.clone(),
        ]
    }

    fn fallback() -> Vec<DownloadRecord> {
        fallback::downloads()
    }
}

/// Applies `K::from_row` to every row, dropping the ones it rejects.
pub fn normalize_rows<K: RecordKind>(rows: &[RawRow]) -> Vec<K::Record> {
    let records: Vec<K::Record> = rows.iter().filter_map(K::from_row).collect();
    if records.len() < rows.len() {
        tracing::debug!(
            "Discarded {} incomplete {} row(s)",
            rows.len() - records.len(),
            K::NAME
        );
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_experience_from_row() {
        let exp = Experiences::from_row(&row(&[
            ("title", "Backend Engineer"),
            ("company", "Acme"),
            ("location", "Remote"),
            ("period", "2021 - 2023"),
            ("type", "Contract"),
            ("description", "APIs"),
            ("achievements", "Cut latency 30%| |Shipped v2"),
            ("technologies", "Rust|Postgres"),
        ]))
        .unwrap();

        assert_eq!(exp.employment_type, "Contract");
        assert_eq!(exp.achievements, vec!["Cut latency 30%", "Shipped v2"]);
        assert_eq!(exp.technologies, vec!["Rust", "Postgres"]);
    }

    #[test]
    fn test_experience_without_title_or_company_is_discarded() {
        assert!(Experiences::from_row(&row(&[("title", "Dev"), ("company", "")])).is_none());
        assert!(Experiences::from_row(&row(&[("title", "  "), ("company", "Acme")])).is_none());
        assert!(Experiences::from_row(&row(&[("company", "Acme")])).is_none());
    }

    #[test]
    fn test_skill_column_lookup_order() {
        assert_eq!(Skills::from_row(&row(&[("skill", "Rust")])).as_deref(), Some("Rust"));
        assert_eq!(
            Skills::from_row(&row(&[("skill", ""), ("name", "Go")])).as_deref(),
            Some("Go")
        );
        assert_eq!(Skills::from_row(&row(&[("Skill", "Zig")])).as_deref(), Some("Zig"));
        assert!(Skills::from_row(&row(&[("skill", "   ")])).is_none());
        assert!(Skills::from_row(&row(&[("level", "expert")])).is_none());
    }

    #[test]
    fn test_project_from_row() {
        let project = Projects::from_row(&row(&[
            ("title", "EcoTrack"),
            ("category", "Mobile App"),
            ("tags", "React Native|Node.js"),
            ("status", "Live"),
            ("featured", "TRUE"),
            ("metrics", "users:10K+|rating:4.8"),
        ]))
        .unwrap();

        assert!(project.featured);
        assert_eq!(project.tags, vec!["React Native", "Node.js"]);
        assert_eq!(project.metrics.get("rating"), Some("4.8"));
        assert_eq!(project.image, "");
        assert_eq!(project.github, "");
    }

    #[test]
    fn test_project_featured_variants() {
        for (raw, expected) in [("TRUE", true), ("1", true), ("no", false), ("", false)] {
            let project =
                Projects::from_row(&row(&[("title", "P"), ("featured", raw)])).unwrap();
            assert_eq!(project.featured, expected, "featured = {:?}", raw);
        }
    }

    #[test]
    fn test_to_fields_matches_headers() {
        for exp in Experiences::fallback() {
            assert_eq!(Experiences::to_fields(&exp).len(), Experiences::HEADERS.len());
        }
        for project in Projects::fallback() {
            assert_eq!(Projects::to_fields(&project).len(), Projects::HEADERS.len());
        }
        for download in Downloads::fallback() {
            assert_eq!(Downloads::to_fields(&download).len(), Downloads::HEADERS.len());
        }
    }

    #[test]
    fn test_project_fields_parse_back() {
        let projects = Projects::fallback();
        let original = &projects[0];
        let fields = Projects::to_fields(original);
        let raw: RawRow = Projects::HEADERS
            .iter()
            .copied()
            .zip(fields)
            .collect();
        assert_eq!(Projects::from_row(&raw).as_ref(), Some(original));
    }

    #[test]
    fn test_normalize_rows_drops_rejected() {
        let rows = vec![
            row(&[("title", "A"), ("company", "X")]),
            row(&[("title", ""), ("company", "Y")]),
        ];
        let records = normalize_rows::<Experiences>(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "A");
    }
}
