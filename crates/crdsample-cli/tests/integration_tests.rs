//! Integration tests for CLI commands

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::{NamedTempFile, TempDir};

const CERTIFICATE_CRD: &str = r#"apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: certificates.example.com
spec:
  group: example.com
  names:
    kind: Certificate
    plural: certificates
  versions:
    - name: v1
      served: true
      storage: true
      schema:
        openAPIV3Schema:
          type: object
          description: A TLS certificate.
          required: [spec]
          properties:
            apiVersion:
              type: string
            kind:
              type: string
            metadata:
              type: object
            spec:
              type: object
              description: Desired certificate.
              required: [secretName]
              properties:
                secretName:
                  type: string
                  description: Secret to store the key pair in.
                duration:
                  type: string
                  pattern: "^[0-9]+h$"
                usages:
                  type: array
                  items:
                    type: string
"#;

const ISSUER_CRD: &str = r#"apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: issuers.example.com
spec:
  group: example.com
  names:
    kind: Issuer
  versions:
    - name: v1alpha1
      schema:
        openAPIV3Schema:
          type: object
          properties:
            kind:
              type: string
            apiVersion:
              type: string
"#;

const CERTIFICATE_SAMPLE: &str = "\
apiVersion: example.com/v1
kind: Certificate
metadata: {}
spec:
  duration: string
  secretName: string
  usages: [] # minItems 0 of type string
";

/// Helper to run crdsample
fn crdsample(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crdsample"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute crdsample")
}

/// Write `content` to a temporary file that lives as long as the handle
fn fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create fixture");
    file.write_all(content.as_bytes()).expect("Failed to write fixture");
    file
}

fn path(file: &NamedTempFile) -> &str {
    file.path().to_str().expect("Temp path should be UTF-8")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

mod generate_command {
    use super::*;

    #[test]
    fn test_generate_to_stdout() {
        let crd = fixture(CERTIFICATE_CRD);
        let output = crdsample(&["generate", path(&crd), "--no-random"]);

        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        assert_eq!(stdout(&output), CERTIFICATE_SAMPLE);
    }

    #[test]
    fn test_generate_minimal() {
        let crd = fixture(CERTIFICATE_CRD);
        let output = crdsample(&["generate", path(&crd), "--minimal", "--no-random"]);

        assert!(output.status.success());
        assert_eq!(
            stdout(&output),
            "apiVersion: example.com/v1\nkind: Certificate\nmetadata: {}\nspec:\n  secretName: string\n"
        );
    }

    #[test]
    fn test_generate_with_comments() {
        let crd = fixture(CERTIFICATE_CRD);
        let output = crdsample(&["generate", path(&crd), "--comments", "--no-random"]);

        assert!(output.status.success());
        let text = stdout(&output);
        assert!(text.contains("# Desired certificate.\nspec:\n"));
        assert!(text.contains("  # Secret to store the key pair in.\n  secretName: string\n"));
    }

    #[test]
    fn test_generate_seeded_pattern() {
        let crd = fixture(CERTIFICATE_CRD);
        let first = crdsample(&["generate", path(&crd), "--seed", "42"]);
        let second = crdsample(&["generate", path(&crd), "--seed", "42"]);

        assert!(first.status.success());
        assert_eq!(stdout(&first), stdout(&second));

        let text = stdout(&first);
        let line = text
            .lines()
            .find(|l| l.starts_with("  duration: "))
            .expect("duration line");
        let value = line
            .trim_start_matches("  duration: ")
            .strip_suffix(" # ^[0-9]+h$")
            .expect("pattern comment");
        assert!(value.ends_with('h'));
        assert!(value[..value.len() - 1].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_to_file() {
        let crd = fixture(CERTIFICATE_CRD);
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("sample.yaml");

        let output = crdsample(&[
            "generate",
            path(&crd),
            "--no-random",
            "-o",
            out.to_str().unwrap(),
        ]);

        assert!(output.status.success());
        assert!(stdout(&output).is_empty());
        assert_eq!(std::fs::read_to_string(&out).unwrap(), CERTIFICATE_SAMPLE);
    }

    #[test]
    fn test_generate_multiple_crds() {
        let crd = fixture(&format!("{}---\n{}", CERTIFICATE_CRD, ISSUER_CRD));
        let output = crdsample(&["generate", path(&crd), "--no-random"]);

        assert!(output.status.success());
        assert_eq!(
            stdout(&output),
            format!(
                "{}\n---\napiVersion: example.com/v1alpha1\nkind: Issuer\n",
                CERTIFICATE_SAMPLE
            )
        );
    }

    #[test]
    fn test_generate_from_stdin() {
        let mut child = Command::new(env!("CARGO_BIN_EXE_crdsample"))
            .args(["generate", "-", "--no-random"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn crdsample");

        child
            .stdin
            .take()
            .unwrap()
            .write_all(CERTIFICATE_CRD.as_bytes())
            .unwrap();
        let output = child.wait_with_output().unwrap();

        assert!(output.status.success());
        assert_eq!(stdout(&output), CERTIFICATE_SAMPLE);
    }

    #[test]
    fn test_generate_with_config_file() {
        let crd = fixture(CERTIFICATE_CRD);
        let config = fixture("requiredOnly: true\nskipRandom: true\n");
        let output = crdsample(&["generate", path(&crd), "--config", path(&config)]);

        assert!(output.status.success());
        assert!(!stdout(&output).contains("duration"));
        assert!(stdout(&output).contains("secretName: string"));
    }

    #[test]
    fn test_generate_depth_exceeded() {
        let crd = fixture(CERTIFICATE_CRD);
        let config = fixture("maxDepth: 0\n");
        let output = crdsample(&["generate", path(&crd), "--config", path(&config)]);

        assert_eq!(output.status.code(), Some(3));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("maximum depth"));
    }
}

mod tree_command {
    use super::*;

    #[test]
    fn test_tree_text() {
        let crd = fixture(CERTIFICATE_CRD);
        let output = crdsample(&["tree", path(&crd)]);

        assert!(output.status.success());
        let text = console::strip_ansi_codes(&stdout(&output)).into_owned();
        assert!(text.starts_with("Certificate example.com/v1\n"));
        assert!(text.contains("  spec object required\n"));
        assert!(text.contains("    secretName string required\n"));
        assert!(text.contains("    duration string /^[0-9]+h$/\n"));
    }

    #[test]
    fn test_tree_json() {
        let crd = fixture(&format!("{}---\n{}", CERTIFICATE_CRD, ISSUER_CRD));
        let output = crdsample(&["tree", path(&crd), "--json"]);

        assert!(output.status.success());
        let json: serde_json::Value =
            serde_json::from_str(&stdout(&output)).expect("Output should be valid JSON");

        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["kind"], "Certificate");
        assert_eq!(records[0]["description"], "A TLS certificate.");
        assert_eq!(records[1]["version"], "v1alpha1");

        let spec = records[0]["properties"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["name"] == "spec")
            .unwrap();
        assert_eq!(spec["required"], true);
        assert_eq!(spec["properties"][1]["name"], "secretName");
    }
}

mod errors {
    use super::*;

    #[test]
    fn test_missing_file() {
        let output = crdsample(&["generate", "/nonexistent/crd.yaml"]);
        assert_eq!(output.status.code(), Some(5));
    }

    #[test]
    fn test_not_a_crd() {
        let input = fixture("apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: x\n");
        let output = crdsample(&["generate", path(&input)]);

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("no CustomResourceDefinition found"));
    }

    #[test]
    fn test_missing_config() {
        let crd = fixture(CERTIFICATE_CRD);
        let output = crdsample(&["tree", path(&crd), "--config", "/nonexistent/options.yaml"]);
        assert_eq!(output.status.code(), Some(4));
    }
}
