use std::fs;

use adtdoc::{convert, render_str, ConversionError, ErrorCategory, ErrorKind};

const NS: &str = r#"xmlns:app="http://www.w3.org/2007/app" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:adtcomp="http://www.sap.com/adt/compatibility""#;

fn service(body: &str) -> String {
    format!("<app:service {NS}>{body}</app:service>")
}

#[test]
fn test_single_workspace_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let input = service(
        r#"<app:workspace>
             <atom:title>Core Data</atom:title>
             <app:collection href="/sap/bc/adt/repository">
               <atom:title>Repositories</atom:title>
               <adtcomp:templateLinks>
                 <adtcomp:templateLink rel="list" template="/sap/bc/adt/repository/informationsystem/search?query={query}"/>
               </adtcomp:templateLinks>
             </app:collection>
           </app:workspace>"#,
    );
    let expected = "# ADT Endpoints\n\
                    \n\
                    ## Core Data\n\
                    \n\
                    ### Repositories\n\
                    \n\
                    - **URL**: `/sap/bc/adt/repository`\n\
                    - **Operations**:\n  \
                    - **list**\n    \
                    - `template`: `/sap/bc/adt/repository/informationsystem/search?query={query}`\n\
                    \n";
    assert_eq!(render_str(&input)?, expected);
    Ok(())
}

#[test]
fn test_zero_workspaces() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(render_str(&service(""))?, "# ADT Endpoints\n\n");
    assert_eq!(render_str("<other/>")?, "# ADT Endpoints\n\n");
    Ok(())
}

#[test]
fn test_untitled_workspace_still_lists_collections() -> Result<(), Box<dyn std::error::Error>> {
    let input = service(
        r#"<app:workspace>
             <app:collection href="/a"><atom:title>A</atom:title></app:collection>
           </app:workspace>"#,
    );
    let output = render_str(&input)?;
    assert!(!output.contains("## "));
    assert_eq!(output, "# ADT Endpoints\n\n### A\n\n- **URL**: `/a`\n\n");
    Ok(())
}

#[test]
fn test_empty_title_is_treated_as_absent() -> Result<(), Box<dyn std::error::Error>> {
    let input = service(
        r#"<app:workspace><atom:title></atom:title>
             <app:collection href="/a"><atom:title/></app:collection>
           </app:workspace>"#,
    );
    assert_eq!(render_str(&input)?, "# ADT Endpoints\n\n- **URL**: `/a`\n\n");
    Ok(())
}

#[test]
fn test_whitespace_title_is_written_verbatim() -> Result<(), Box<dyn std::error::Error>> {
    let input = service(
        r#"<app:workspace><atom:title> </atom:title>
             <app:collection href="/a"><atom:title><![CDATA[A]]> <![CDATA[B]]></atom:title></app:collection>
           </app:workspace>"#,
    );
    assert_eq!(
        render_str(&input)?,
        "# ADT Endpoints\n\n##  \n\n### A B\n\n- **URL**: `/a`\n\n"
    );
    Ok(())
}

#[test]
fn test_attribute_line_break_becomes_single_space() -> Result<(), Box<dyn std::error::Error>> {
    let input = service("<app:workspace><app:collection href=\"/a\r\nb\"/></app:workspace>");
    assert_eq!(render_str(&input)?, "# ADT Endpoints\n\n- **URL**: `/a b`\n\n");
    Ok(())
}

#[test]
fn test_deeply_nested_input_is_a_parse_error() -> Result<(), Box<dyn std::error::Error>> {
    let levels = 100_000;
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("deep.xml");
    let output = dir.path().join("deep.md");
    fs::write(
        &input,
        format!("{}{}", "<x>".repeat(levels), "</x>".repeat(levels)),
    )?;

    match convert(&input, &output) {
        Err(ConversionError::Parse { source, .. }) => {
            assert_eq!(source.kind(), &ErrorKind::MaxDepthExceeded { max: 128 });
        }
        other => {
            return Err(std::io::Error::other(format!("expected parse error, got {other:?}")).into());
        }
    }
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_empty_template_container_writes_no_operations() -> Result<(), Box<dyn std::error::Error>> {
    let input = service(
        r#"<app:workspace><atom:title>W</atom:title>
             <app:collection href="/a"><atom:title>A</atom:title><adtcomp:templateLinks/></app:collection>
           </app:workspace>"#,
    );
    let output = render_str(&input)?;
    assert!(!output.contains("Operations"));
    assert!(output.ends_with("- **URL**: `/a`\n\n"));
    Ok(())
}

#[test]
fn test_absent_attributes_render_none() -> Result<(), Box<dyn std::error::Error>> {
    let input = service(
        r#"<app:workspace><atom:title>W</atom:title>
             <app:collection><atom:title>A</atom:title>
               <adtcomp:templateLinks><adtcomp:templateLink template="/t"/></adtcomp:templateLinks>
             </app:collection>
           </app:workspace>"#,
    );
    let output = render_str(&input)?;
    assert!(output.contains("- **URL**: `None`\n"));
    assert!(output.contains("  - **None**\n    - `template`: `/t`\n"));
    Ok(())
}

#[test]
fn test_matching_is_by_namespace_uri_not_prefix() -> Result<(), Box<dyn std::error::Error>> {
    let input = r#"<service xmlns="http://www.w3.org/2007/app">
        <workspace>
          <t:title xmlns:t="http://www.w3.org/2005/Atom">Renamed</t:title>
          <collection href="/r">
            <c:templateLinks xmlns:c="http://www.sap.com/adt/compatibility">
              <c:templateLink rel="self" template="/r/{id}"/>
            </c:templateLinks>
          </collection>
          <title>not atom</title>
        </workspace>
      </service>"#;
    let output = render_str(input)?;
    assert_eq!(
        output,
        "# ADT Endpoints\n\n## Renamed\n\n- **URL**: `/r`\n- **Operations**:\n  - **self**\n    - `template`: `/r/{id}`\n\n"
    );
    Ok(())
}

#[test]
fn test_document_order_preserved_with_duplicates() -> Result<(), Box<dyn std::error::Error>> {
    let input = service(
        r#"<app:workspace><atom:title>Z</atom:title><app:collection href="/2"/><app:collection href="/1"/></app:workspace>
           <app:workspace><atom:title>A</atom:title><app:collection href="/2"/></app:workspace>
           <app:workspace><atom:title>Z</atom:title></app:workspace>"#,
    );
    let output = render_str(&input)?;
    let lines: Vec<_> = output
        .lines()
        .filter(|line| line.starts_with("##") || line.starts_with("- **URL**"))
        .collect();
    assert_eq!(
        lines,
        vec![
            "## Z",
            "- **URL**: `/2`",
            "- **URL**: `/1`",
            "## A",
            "- **URL**: `/2`",
            "## Z",
        ]
    );
    Ok(())
}

#[test]
fn test_malformed_xml_is_rejected() {
    let err = render_str(&service("<app:workspace>")).err();
    assert!(matches!(
        err.as_ref().map(adtdoc::Error::kind),
        Some(ErrorKind::MismatchedTag { .. })
    ));
}

#[test]
fn test_convert_writes_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("discovery.xml");
    let output = dir.path().join("endpoints.md");
    fs::write(&input, service(r#"<app:workspace><atom:title>W</atom:title></app:workspace>"#))?;
    fs::write(&output, "stale content that must disappear\n".repeat(10))?;

    convert(&input, &output)?;

    assert_eq!(fs::read_to_string(&output)?, "# ADT Endpoints\n\n## W\n\n");
    Ok(())
}

#[test]
fn test_convert_missing_input_is_parse_category() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("out.md");
    let err = convert(dir.path().join("missing.xml"), &output).err();

    assert!(matches!(err, Some(ConversionError::Read { .. })));
    assert_eq!(err.map(|e| e.category()), Some(ErrorCategory::Parse));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_convert_malformed_input_leaves_output_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("bad.xml");
    let output = dir.path().join("out.md");
    fs::write(&input, "<app:service><unclosed></app:service>")?;
    fs::write(&output, "previous")?;

    let err = convert(&input, &output).err();

    assert!(matches!(err, Some(ConversionError::Parse { .. })));
    assert_eq!(fs::read_to_string(&output)?, "previous");
    Ok(())
}

#[test]
fn test_convert_unwritable_output_is_io_category() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("discovery.xml");
    fs::write(&input, service(""))?;
    let output = dir.path().join("no-such-dir").join("out.md");

    let err = convert(&input, &output).err();

    assert!(matches!(err, Some(ConversionError::Write { .. })));
    assert_eq!(err.map(|e| e.category()), Some(ErrorCategory::Io));
    Ok(())
}
