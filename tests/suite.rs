// End-to-end checks over the shipped data, the library entry points, and the
// two binaries.

mod support;

use anyhow::{Context, Result};
use curriculum_forge::catalogue::CATALOGUE_SCHEMA_VERSION;
use curriculum_forge::{
    BuildError, CatalogueRepository, CurriculumBuilder, TieBreak, load_specifications,
    run_batch, validate_curriculum,
};
use jsonschema::JSONSchema;
use serde_json::{Value, json};
use std::fs;
use support::{
    build_binary, catalogue, isolated_command, json_files, lint_binary, module, project_root,
    role, run_command, spec, write_json,
};
use tempfile::TempDir;

#[test]
fn shipped_catalogue_matches_schema() -> Result<()> {
    let root = project_root();
    let schema: Value =
        serde_json::from_str(&fs::read_to_string(root.join("schema/catalogue.schema.json"))?)?;
    let compiled = JSONSchema::compile(&schema).map_err(|err| anyhow::anyhow!("{err}"))?;
    let catalogue: Value =
        serde_json::from_str(&fs::read_to_string(root.join("data/catalogue.json"))?)?;
    assert!(compiled.is_valid(&catalogue));
    assert_eq!(catalogue["schema_version"], json!(CATALOGUE_SCHEMA_VERSION));
    Ok(())
}

#[test]
fn shipped_specifications_all_build_and_validate() -> Result<()> {
    let root = project_root();
    let repository = CatalogueRepository::load(&root.join("data/catalogue.json"))?;
    let specs = load_specifications(&root.join("data/curricula.json"))?;
    assert_eq!(specs.len(), 12);

    let builder = CurriculumBuilder::new(&repository);
    let curricula = run_batch(&builder, &specs)
        .into_result()
        .context("shipped batch should build completely")?;
    assert_eq!(curricula.len(), specs.len());

    for (spec, curriculum) in specs.iter().zip(&curricula) {
        let report = validate_curriculum(curriculum);
        assert!(
            report.is_valid(),
            "{} has errors: {:?}",
            spec.id,
            report.errors
        );
        let ident = &curriculum.curriculum_identification;
        assert!(ident.total_ects <= spec.target_credit + 1e-9);
        assert_eq!(curriculum.visual_outcome_mapping.rows.len(), 3);
        for module in curriculum.modules() {
            assert!(module.eqf_level <= spec.eqf_level.get());
            assert!(module.eqf_level + 2 >= spec.eqf_level.get());
        }
    }
    Ok(())
}

#[test]
fn worked_example_through_loaded_catalogue() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_json(
        dir.path(),
        "catalogue.json",
        &catalogue(
            vec![
                module("L6", 6, 1.5, json!({"DAN": 90})),
                module("L5", 5, 1.0, json!({"DAN": 70})),
            ],
            vec![role("DAN", "Data Analyst")],
        ),
    )?;
    let repository = CatalogueRepository::load(&path)?;
    let specification = serde_json::from_value(spec("DAN_X", "DAN", 6, 2.0))?;
    let curriculum = CurriculumBuilder::new(&repository).build(&specification)?;

    let allocations: Vec<(&str, f64, i32)> = curriculum
        .modules()
        .iter()
        .map(|m| (m.module_id.as_str(), m.ects_credits, m.role_relevance_score))
        .collect();
    assert_eq!(allocations, vec![("L6", 1.5, 100), ("L5", 0.5, 77)]);
    assert_eq!(curriculum.curriculum_identification.total_ects, 2.0);
    Ok(())
}

#[test]
fn schema_rejects_catalogue_missing_required_module_field() -> Result<()> {
    let dir = TempDir::new()?;
    let mut broken = module("M1", 5, 1.0, json!({"DAN": 80}));
    if let Some(fields) = broken.as_object_mut() {
        fields.remove("ects_points");
    }
    let path = write_json(
        dir.path(),
        "catalogue.json",
        &catalogue(vec![broken], vec![role("DAN", "Data Analyst")]),
    )?;
    let err = CatalogueRepository::load(&path).expect_err("missing credit is fatal");
    assert!(format!("{err:#}").contains("ects_points"), "{err:#}");
    Ok(())
}

#[test]
fn duplicate_module_ids_abort_the_load() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_json(
        dir.path(),
        "catalogue.json",
        &catalogue(
            vec![
                module("M1", 5, 1.0, json!({"DAN": 80})),
                module("M1", 4, 1.0, json!({"DAN": 70})),
            ],
            vec![role("DAN", "Data Analyst")],
        ),
    )?;
    let err = CatalogueRepository::load(&path).expect_err("duplicate id is fatal");
    assert!(format!("{err:#}").contains("duplicate module id M1"));
    Ok(())
}

#[test]
fn tie_break_policy_is_honoured_end_to_end() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_json(
        dir.path(),
        "catalogue.json",
        &catalogue(
            vec![
                module("ZETA", 5, 1.0, json!({"DAN": 80})),
                module("ALPHA", 5, 1.0, json!({"DAN": 80})),
            ],
            vec![role("DAN", "Data Analyst")],
        ),
    )?;
    let repository = CatalogueRepository::load(&path)?;
    let specification = serde_json::from_value(spec("DAN_T", "DAN", 5, 1.0))?;

    let default = CurriculumBuilder::new(&repository).build(&specification)?;
    assert_eq!(default.modules()[0].module_id, "ZETA");
    let by_id = CurriculumBuilder::new(&repository)
        .with_tie_break(TieBreak::ModuleId)
        .build(&specification)?;
    assert_eq!(by_id.modules()[0].module_id, "ALPHA");
    Ok(())
}

#[test]
fn curriculum_build_writes_numbered_records() -> Result<()> {
    let dir = TempDir::new()?;
    let catalogue_path = write_json(
        dir.path(),
        "catalogue.json",
        &catalogue(
            vec![module("M5", 5, 2.0, json!({"DAN": 85, "DSL": 75}))],
            vec![role("DAN", "Data Analyst"), role("DSL", "Lead")],
        ),
    )?;
    let specs_path = write_json(
        dir.path(),
        "specs.json",
        &json!([spec("First", "DAN", 5, 1.0), spec("Second", "DSL", 5, 2.0)]),
    )?;
    let output = dir.path().join("out");

    let mut cmd = isolated_command(&build_binary());
    cmd.arg("--catalogue")
        .arg(&catalogue_path)
        .arg("--specs")
        .arg(&specs_path)
        .arg("--output")
        .arg(&output);
    let result = run_command(cmd)?;
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("wrote 2 of 2 curricula"), "{stdout}");

    assert_eq!(
        json_files(&output)?,
        vec!["01_First.json".to_string(), "02_Second.json".to_string()]
    );
    let record: Value = serde_json::from_str(&fs::read_to_string(output.join("02_Second.json"))?)?;
    assert_eq!(record["curriculum_identification"]["target_role"], json!("DSL"));
    assert_eq!(record["curriculum_identification"]["total_ects"], json!(2.0));
    Ok(())
}

#[test]
fn curriculum_build_aborts_on_first_unbuildable_spec() -> Result<()> {
    let dir = TempDir::new()?;
    let catalogue_path = write_json(
        dir.path(),
        "catalogue.json",
        &catalogue(
            vec![module("M5", 5, 2.0, json!({"DAN": 85}))],
            vec![role("DAN", "Data Analyst")],
        ),
    )?;
    let specs_path = write_json(
        dir.path(),
        "specs.json",
        &json!([
            spec("Ok", "DAN", 5, 1.0),
            spec("NoModules", "DAN", 8, 1.0),
            spec("Skipped", "DAN", 5, 1.0)
        ]),
    )?;
    let output = dir.path().join("out");

    let result = isolated_command(&build_binary())
        .arg("--catalogue")
        .arg(&catalogue_path)
        .arg("--specs")
        .arg(&specs_path)
        .arg("--output")
        .arg(&output)
        .output()?;
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("NoModules"), "{stderr}");
    assert!(stderr.contains("after 1 curricula"), "{stderr}");
    assert_eq!(json_files(&output)?, vec!["01_Ok.json".to_string()]);
    Ok(())
}

#[test]
fn environment_overrides_are_used_when_flags_are_absent() -> Result<()> {
    let dir = TempDir::new()?;
    let catalogue_path = write_json(
        dir.path(),
        "catalogue.json",
        &catalogue(
            vec![module("M4", 4, 1.0, json!({"DAN": 90}))],
            vec![role("DAN", "Data Analyst")],
        ),
    )?;
    let specs_path = write_json(dir.path(), "specs.json", &json!([spec("Env", "DAN", 4, 1.0)]))?;
    let output = dir.path().join("env-out");

    let mut cmd = isolated_command(&build_binary());
    cmd.env("CURRICULUM_CATALOGUE", &catalogue_path)
        .env("CURRICULUM_SPECS", &specs_path)
        .env("CURRICULUM_OUTPUT", &output);
    run_command(cmd)?;
    assert_eq!(json_files(&output)?, vec!["01_Env.json".to_string()]);
    Ok(())
}

#[test]
fn catalogue_lint_reports_unbuildable_specs() -> Result<()> {
    let dir = TempDir::new()?;
    let catalogue_path = write_json(
        dir.path(),
        "catalogue.json",
        &catalogue(
            vec![module("M5", 5, 1.0, json!({"DAN": 85}))],
            vec![role("DAN", "Data Analyst")],
        ),
    )?;
    let specs_path = write_json(
        dir.path(),
        "specs.json",
        &json!([spec("Good", "DAN", 5, 1.0), spec("Orphan", "DSX", 5, 1.0)]),
    )?;

    let result = isolated_command(&lint_binary())
        .arg("--catalogue")
        .arg(&catalogue_path)
        .arg("--specs")
        .arg(&specs_path)
        .output()?;
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("1 problem(s) found"), "{stderr}");
    assert!(
        stderr.contains(&format!(
            "Orphan: {}",
            BuildError::UnknownRole("DSX".into())
        )),
        "{stderr}"
    );
    Ok(())
}

#[test]
fn catalogue_lint_passes_on_shipped_data() -> Result<()> {
    let result = run_command(isolated_command(&lint_binary()))?;
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("12 specifications OK"), "{stdout}");
    assert!(stdout.contains("warning:"), "expected under-allocation warnings: {stdout}");
    Ok(())
}
