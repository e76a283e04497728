use std::io::Write;

use talent_match::roster::{RosterImportError, RosterImporter, RosterSource};

#[test]
fn standard_roster_imports_from_disk_and_reports_bad_rows() {
    let mut file = tempfile::NamedTempFile::new().expect("temp roster");
    write!(
        file,
        "id,username,name,job_title,skills,experience,rating,hourly_rate,profile_url,availability,total_sales\n\
c-1,ada,Ada,Frontend Developer,\"React, CSS\",5,4.5,$60,https://example.test/ada,yes,12\n\
c-2,,Bruno,Chef,cooking,10,5.0,40,,,3\n\
,ghost,Ghost,Nobody,,1,1,1,,true,0\n\
c-4,cleo,Cleo,Designer,Figma,3,4.0,45,,maybe,1\n"
    )
    .expect("roster written");

    let import =
        RosterImporter::from_path(file.path(), RosterSource::Standard).expect("roster imports");

    assert_eq!(import.candidates.len(), 2);
    let ada = &import.candidates[0];
    assert_eq!(ada.skills, vec!["React", "CSS"]);
    assert_eq!(ada.rate, 60.0);
    assert!(ada.available);
    assert_eq!(ada.completed_engagements, 12);

    let bruno = &import.candidates[1];
    assert_eq!(bruno.username, "Bruno");
    assert!(bruno.available);

    let lines: Vec<u64> = import.rejected.iter().map(|row| row.line).collect();
    assert_eq!(lines, vec![4, 5]);
}

#[test]
fn marketplace_roster_maps_its_own_columns() {
    let csv = "freelancer_id,name,job_title,skills,years_of_experience,success_rate,hourly_rate,portfolio_url,top_rated,total_jobs\n\
u-1,Ada,Frontend Developer,\"React, CSS\",5,92%,60,,true,40\n\
u-2,Bo,Backend Developer,\"Rust, SQL\",7,88,75,,,12\n";

    let import = RosterImporter::from_reader(csv.as_bytes(), RosterSource::Marketplace)
        .expect("marketplace roster imports");

    assert!(import.rejected.is_empty());
    assert_eq!(import.candidates.len(), 2);
    assert_eq!(import.candidates[0].id.0, "u-1");
    assert_eq!(import.candidates[0].username, "Ada");
    assert_eq!(import.candidates[0].rating, 92.0);
    assert!(import.candidates[0].available);
    assert_eq!(import.candidates[1].experience_years, 7);
    assert!(!import.candidates[1].available);
    assert_eq!(RosterSource::Marketplace.rating_scale(), 100.0);
}

#[test]
fn missing_roster_file_is_an_open_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = RosterImporter::from_path(dir.path().join("absent.csv"), RosterSource::Standard)
        .expect_err("file is missing");
    assert!(matches!(err, RosterImportError::Open { .. }));
}

#[test]
fn unknown_source_names_are_rejected() {
    assert_eq!(
        "Marketplace".parse::<RosterSource>().expect("known source"),
        RosterSource::Marketplace
    );
    let err = "linkedin".parse::<RosterSource>().expect_err("unknown source");
    assert!(matches!(err, RosterImportError::UnknownSource(name) if name == "linkedin"));
}

#[test]
fn row_with_invalid_utf8_is_skipped_and_import_continues() {
    let mut csv = b"id,username,name,job_title,skills,experience,rating,hourly_rate,profile_url,availability,total_sales\n\
c-1,ada,Ada,Frontend Developer,React,5,4.5,60,,true,10\n\
c-2,bad,"
        .to_vec();
    csv.extend_from_slice(b"Br\xff\xfeno,Chef,cooking,10,5.0,40,,true,3\n");
    csv.extend_from_slice(b"c-3,cleo,Cleo,Designer,Figma,3,4.0,45,,true,1\n");

    let import = RosterImporter::from_reader(&csv[..], RosterSource::Standard)
        .expect("bad encoding rejects one row only");

    let ids: Vec<&str> = import.candidates.iter().map(|c| c.id.0.as_str()).collect();
    assert_eq!(ids, vec!["c-1", "c-3"]);
    assert_eq!(import.rejected.len(), 1);
    assert_eq!(import.rejected[0].line, 3);
    assert!(import.rejected[0].reason.contains("utf-8"));
}
