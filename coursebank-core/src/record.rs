//! One-line textual records
//!
//! A record reads `CODE "TITLE" CREDITS [PREREQ...] [active|inactive]`.

use tracing::debug;

use crate::course::{Course, CourseFields};
use crate::error::{CatalogError, Result};
use crate::patterns::{self, RECORD};

/// Split one record into its textual fields without validating them
pub fn parse_fields(line: &str) -> Result<CourseFields> {
    let caps = RECORD
        .captures(line)
        .ok_or_else(|| CatalogError::MalformedRecord(line.to_string()))?;

    Ok(CourseFields {
        code: caps["code"].to_string(),
        title: caps["title"].to_string(),
        credits: caps["credits"].to_string(),
        prerequisites: caps["prerequisites"]
            .split_whitespace()
            .map(String::from)
            .collect(),
        active: caps.name("active").map(|m| m.as_str().to_string()),
    })
}

/// Parse one record into a course
pub fn parse_line(line: &str) -> Result<Course> {
    Course::from_fields(parse_fields(line)?)
}

/// Render a course as a record, always ending with its active-state marker
pub fn render_line(course: &Course) -> String {
    let mut line = format!(
        "{} \"{}\" {}",
        course.code(),
        course.title(),
        course.credits()
    );
    for prerequisite in course.prerequisites() {
        line.push(' ');
        line.push_str(prerequisite);
    }
    line.push(' ');
    line.push_str(patterns::active_marker(course.is_active()));
    line
}

/// Parse every record of a depot, skipping blank lines.
///
/// Fails on the first bad line, reporting its 1-based line number.
pub fn parse_lines<I, S>(lines: I) -> Result<Vec<Course>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut courses = Vec::new();
    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        let course = parse_line(line).map_err(|source| CatalogError::Record {
            line: index + 1,
            source: Box::new(source),
        })?;
        courses.push(course);
    }
    debug!(count = courses.len(), "Parsed course records");
    Ok(courses)
}

/// Render courses one record per line, each line newline-terminated
pub fn render_lines<'a, I>(courses: I) -> String
where
    I: IntoIterator<Item = &'a Course>,
{
    courses.into_iter().fold(String::new(), |mut out, course| {
        out.push_str(&render_line(course));
        out.push('\n');
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_record() {
        let course = parse_line(r#"INF1120 "Programmation I" 3"#).unwrap();
        assert_eq!(course.code(), "INF1120");
        assert_eq!(course.title(), "Programmation I");
        assert_eq!(course.credits(), 3);
        assert!(course.prerequisites().is_empty());
        assert!(course.is_active());
    }

    #[test]
    fn test_parse_record_with_prerequisites_and_marker() {
        let course =
            parse_line("  INF3135   'Construction et maintenance'  3  INF1120\tINF2120 inactive ")
                .unwrap();
        assert_eq!(course.title(), "Construction et maintenance");
        assert_eq!(course.prerequisites(), ["INF1120", "INF2120"]);
        assert!(!course.is_active());
    }

    #[test]
    fn test_parse_accepts_mismatched_quotes() {
        let course = parse_line(r#"INF1120 "Programmation I' 3 active"#).unwrap();
        assert_eq!(course.title(), "Programmation I");
    }

    #[test]
    fn test_parse_title_with_inner_quotes() {
        let course = parse_line(r#"INF1120 "L'atelier "C"" 3"#).unwrap();
        assert_eq!(course.title(), r#"L'atelier "C""#);
    }

    #[test]
    fn test_malformed_records() {
        for line in ["INF1120 Programmation 3", "INF1120", r#""Programmation" 3"#, ""] {
            assert_eq!(
                parse_line(line),
                Err(CatalogError::MalformedRecord(line.to_string())),
                "{line:?}"
            );
        }
    }

    #[test]
    fn test_well_shaped_record_with_bad_fields() {
        assert_eq!(
            parse_line(r#"inf1120 "Programmation I" 3"#),
            Err(CatalogError::InvalidCode("inf1120".to_string()))
        );
        assert_eq!(
            parse_line(r#"INF1120 "  " 3"#),
            Err(CatalogError::InvalidTitle("  ".to_string()))
        );
        assert_eq!(
            parse_line(r#"INF1120 "Programmation I" zero"#),
            Err(CatalogError::InvalidCredits("zero".to_string()))
        );
        assert_eq!(
            parse_line(r#"INF2120 "Programmation II" 3 inf1120"#),
            Err(CatalogError::InvalidPrerequisiteFormat(vec![
                "inf1120".to_string()
            ]))
        );
        assert_eq!(
            parse_line(r#"INF2120 "Programmation II" 3 INF1120 yes"#),
            Err(CatalogError::InvalidActiveFlag("yes".to_string()))
        );
    }

    #[test]
    fn test_parse_fields_keeps_raw_text() {
        assert_eq!(
            parse_fields(r#"  INF2120 'Programmation II" 0 inf1120 inactive "#),
            Ok(CourseFields {
                code: "INF2120".to_string(),
                title: "Programmation II".to_string(),
                credits: "0".to_string(),
                prerequisites: vec!["inf1120".to_string()],
                active: Some("inactive".to_string()),
            })
        );
        assert_eq!(
            parse_fields("INF2120 3"),
            Err(CatalogError::MalformedRecord("INF2120 3".to_string()))
        );
    }

    #[test]
    fn test_render_line() {
        let mut course = Course::new(
            "INF2120",
            "Programmation II",
            3,
            vec!["INF1120".to_string(), "MAT1600".to_string()],
        )
        .unwrap();
        assert_eq!(
            render_line(&course),
            r#"INF2120 "Programmation II" 3 INF1120 MAT1600 active"#
        );
        course.deactivate().unwrap();
        assert_eq!(
            render_line(&course),
            r#"INF2120 "Programmation II" 3 INF1120 MAT1600 inactive"#
        );
    }

    #[test]
    fn test_round_trip() {
        let courses = [
            Course::new("INF1120", "Programmation I", 3, vec![]).unwrap(),
            Course::new(
                "INF2120",
                " spaced title ",
                45,
                vec!["INF1120".to_string()],
            )
            .unwrap(),
            Course::with_status("MAT1600", "Algèbre 'matricielle'", 4, vec![], false).unwrap(),
        ];
        for course in courses {
            assert_eq!(parse_line(&render_line(&course)), Ok(course));
        }
    }

    #[test]
    fn test_parse_lines_skips_blanks_and_reports_line_numbers() {
        let depot = "INF1120 \"Programmation I\" 3 active\n\n   \nINF2120 \"Programmation II\" 3 INF1120 active\n";
        let courses = parse_lines(depot.lines()).unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[1].code(), "INF2120");

        let err = parse_lines(["INF1120 \"Programmation I\" 3", "", "garbage"]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::Record {
                line: 3,
                source: Box::new(CatalogError::MalformedRecord("garbage".to_string())),
            }
        );
    }

    #[test]
    fn test_render_lines() {
        let courses = vec![
            Course::new("INF1120", "Programmation I", 3, vec![]).unwrap(),
            Course::new("MAT1600", "Algèbre", 4, vec![]).unwrap(),
        ];
        assert_eq!(
            render_lines(&courses),
            "INF1120 \"Programmation I\" 3 active\nMAT1600 \"Algèbre\" 4 active\n"
        );
        assert_eq!(render_lines(Vec::<Course>::new().iter()), "");
    }
}
