use pretty_assertions::assert_eq;
use question_json::models::question::ChoiceKind;
use question_json::{DocumentProcessor, MemorySink, QuestionType};

fn process(doc: &str) -> (question_json::ProcessingStats, MemorySink) {
    let mut sink = MemorySink::new();
    let stats = DocumentProcessor::new().process(doc, &mut sink);
    (stats, sink)
}

#[test]
fn test_single_mcq_question() {
    let doc = "id: 1001\nlanguage: en\ntype: mcq\n\n[STEM]\nWhat is 2 + 2?\n\n[CHOICES]\n*4\n3\n5";
    let (stats, sink) = process(doc);

    assert_eq!(stats.successful, 1);
    let record = sink.get("1001.json").expect("记录应已保存");
    assert_eq!(record.parts.len(), 1);
    assert_eq!(record.metadata.parts_count, 1);
    assert!(record.statement.is_none());

    let part = &record.parts[0];
    assert_eq!(part.kind, QuestionType::Mcq);
    let choices = part.body.choices().expect("mcq 应有选项");
    assert_eq!(choices.len(), 3);
    assert_eq!(choices[0].kind, ChoiceKind::Key);
    assert!(choices[0].html_content.contains('4'));
    assert_eq!(choices[1].kind, ChoiceKind::Distractor);
}

#[test]
fn test_statement_with_two_parts() {
    let doc = "\
id: 2001
language: en
type: frq

[STATEMENT]
Read the passage below.

[PART]
[STEM]
First question
[ANSWER]
first

[PART]
type: mcq
[STEM]
Second question
[CHOICES]
*yes
no
";
    let (stats, sink) = process(doc);

    assert_eq!(stats.successful, 1);
    let record = sink.get("2001.json").expect("记录应已保存");
    assert!(record
        .statement
        .as_deref()
        .is_some_and(|s| s.contains("Read the passage below.")));
    assert_eq!(record.parts.len(), 2);
    assert_eq!(record.metadata.parts_count, 2);
    assert_eq!(record.parts[0].n, 1);
    assert_eq!(record.parts[1].n, 2);
    assert_eq!(record.parts[0].kind, QuestionType::Frq);
    assert_eq!(record.parts[1].kind, QuestionType::Mcq);
}

#[test]
fn test_malformed_matching_line_rejects_question() {
    let doc = "id: 3001\nlanguage: en\ntype: matching\n[MATCHING_PAIRS]\ncat | قطة\ndog without separator";
    let (stats, sink) = process(doc);

    assert_eq!(stats.failed, 1);
    assert_eq!(stats.successful, 0);
    assert!(sink.get("3001.json").is_none());
    assert!(stats.failures[0].reason.contains("dog without separator"));
}

#[test]
fn test_frq_ai_without_template_is_rejected() {
    let doc = "id: 4001\nlanguage: en\ntype: frq_ai\n[STEM]\nExplain.\n[ANSWER]\nBecause.";
    let (stats, sink) = process(doc);

    assert_eq!(stats.failed, 1);
    assert!(sink.records.is_empty());
    assert!(stats.failures[0].reason.contains("ai_template_id"));
}

#[test]
fn test_matching_emits_two_groups() {
    let doc = "id: 5001\nlanguage: en\ntype: matching\n[MATCHING_PAIRS]\na | 1\nb | 2\nc | 3";
    let (_, sink) = process(doc);

    let record = sink.get("5001.json").expect("记录应已保存");
    let choices = record.parts[0].body.choices().expect("matching 应有选项");
    assert_eq!(choices.len(), 6);

    for (j, choice) in choices.iter().enumerate() {
        assert_eq!(choice.index, j);
        assert_eq!(choice.fixed_order, j + 1);
        let expected_group = if j < 3 { 1 } else { 2 };
        assert_eq!(choice.group, Some(expected_group));
        assert_eq!(choice.correct_order, Some(j % 3 + 1));
    }
}

#[test]
fn test_arabic_math_uses_arabic_glyphs() {
    let doc = "id: 6001\nlanguage: ar\ntype: frq\n[STEM]\nاحسب `x + 1`\n[ANSWER]\n`y`";
    let (_, sink) = process(doc);

    let record = sink.get("6001.json").expect("记录应已保存");
    let stem = record.parts[0].stem.as_deref().expect("应有题干");
    assert!(stem.contains("dir=\"rtl\""));
    assert!(stem.contains("\\seen + 1"));
    assert!(stem.contains("locale=\"ar\""));
}

#[test]
fn test_document_counts_every_block() {
    let doc = "\
id: 7001
language: en
type: string
[ANSWER]
one
---
id: 7002
language: fr
type: string
[ANSWER]
two
---
id: 7003
language: en
type: oq
[CHOICES]
first
second
";
    let (stats, sink) = process(doc);

    assert_eq!(stats.total_questions, 3);
    assert_eq!(stats.successful, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.failures[0].ordinal, 2);
    assert_eq!(stats.generated_files, vec!["7001.json", "7003.json"]);
    assert_eq!(sink.records.len(), 2);
}

#[test]
fn test_record_serializes_expected_shape() {
    let doc = "id: 8001\nlanguage: en\ntype: input_box\n[STEM]\nHow far?\n[ANSWER]\n12 | km";
    let (_, sink) = process(doc);

    let record = sink.get("8001.json").expect("记录应已保存");
    let json = serde_json::to_value(record).expect("序列化失败");

    assert_eq!(json["instance_number"], 1);
    assert_eq!(json["metadata"]["id"], 8001);
    assert_eq!(json["metadata"]["parts_count"], 1);
    assert_eq!(json["parts"][0]["type"], "input_box");
    assert_eq!(json["parts"][0]["answer"]["value"], "12");
    assert_eq!(json["parts"][0]["answer"]["unit"], "km");
    assert_eq!(json["parts"][0]["answer"]["constrains"]["type"], "integer");
}
