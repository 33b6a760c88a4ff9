//! End-to-end tests: shape → descriptors → converted snippet descriptors.
//!
//! Each test builds a `RestDocs` instance the way a documentation test would
//! and checks what reaches the snippet renderer.

use pretty_assertions::assert_eq;

use restdocs_easy::constraints::CONSTRAINTS_KEY;
use restdocs_easy::message::{BundleMessageSource, Locale, StaticMessageSource};
use restdocs_easy::{
    merge, types, Annotation, DataShape, Descriptor, DocsConfig, Error, FieldDef, JsonFieldType,
    RestDocs, Shape, ShapeCatalog, TypeRef, ValidationGroup,
};

struct CreateGroup;

fn create() -> ValidationGroup {
    ValidationGroup::of::<CreateGroup>()
}

struct MemberRequest;

impl DataShape for MemberRequest {
    fn shape() -> Shape {
        Shape::record("com.example.MemberRequest")
            .component(FieldDef::new("name", types::string()).annotate(Annotation::not_blank()))
            .component(
                FieldDef::new("age", types::int())
                    .annotate(Annotation::min(18).groups([ValidationGroup::of::<CreateGroup>()])),
            )
    }
}

fn account() -> Shape {
    let status = TypeRef::enumeration("com.example.Status", ["ACTIVE", "INACTIVE"]);
    Shape::class("com.example.Account")
        .property(FieldDef::new("id", types::long()))
        .property(FieldDef::new("status", status))
}

fn account_messages() -> StaticMessageSource {
    StaticMessageSource::new()
        .message("com.example.Account.status", "Account status")
        .message("com.example.Status.ACTIVE", "Currently active")
        .message("com.example.Status.INACTIVE", "No longer active")
}

#[test]
fn member_without_groups() {
    let docs = RestDocs::default();
    let descriptors = docs.generate_for::<MemberRequest>().unwrap().into_list();

    let name = &descriptors[0];
    assert_eq!(name.name(), "name");
    assert!(!name.is_optional());
    assert_eq!(name.attributes().len(), 1);
    assert_eq!(name.attribute(CONSTRAINTS_KEY), Some("Must not be blank"));

    let age = &descriptors[1];
    assert_eq!(age.name(), "age");
    assert_eq!(age.ty(), JsonFieldType::Number);
    assert!(age.is_optional());
    assert!(age.attributes().is_empty());
}

#[test]
fn member_under_create_group() {
    let docs = RestDocs::default();
    let descriptors = docs
        .generate_with(None, &MemberRequest::shape(), &[create()])
        .unwrap()
        .into_list();

    let age = &descriptors[1];
    assert_eq!(age.attributes().len(), 1);
    assert_eq!(age.attribute(CONSTRAINTS_KEY), Some("Must be at least 18"));
    // Only NotNull / NotEmpty / NotBlank make a field required.
    assert!(age.is_optional());
}

#[test]
fn grouped_not_null_is_required_only_under_its_group() {
    let shape = Shape::record("com.example.Update").component(
        FieldDef::new("age", types::int()).annotate(Annotation::not_null().groups([create()])),
    );
    let docs = RestDocs::default();

    let without = docs.generate(&shape).unwrap().into_list();
    assert!(without[0].is_optional());
    assert!(without[0].attributes().is_empty());

    let other = docs
        .generate_with(None, &shape, &[ValidationGroup::new("Other")])
        .unwrap()
        .into_list();
    assert!(other[0].is_optional());

    let with = docs.generate_with(None, &shape, &[create()]).unwrap().into_list();
    assert!(!with[0].is_optional());
    assert_eq!(with[0].attribute(CONSTRAINTS_KEY), Some("Must not be null"));
}

#[test]
fn enum_field_description() {
    let docs = RestDocs::builder().message_source(account_messages()).build();
    let fields = docs.generate(&account()).unwrap().to_field();

    let status = &fields[1];
    assert_eq!(status.path, "status");
    assert_eq!(status.ty, JsonFieldType::String);
    assert_eq!(
        status.description.as_deref(),
        Some("Account status\n\nACTIVE : Currently active + \nINACTIVE : No longer active")
    );
}

#[test]
fn enum_listing_for_query_parameter() {
    let docs = RestDocs::builder().message_source(account_messages()).build();
    let status = Shape::enumeration("com.example.Status", ["ACTIVE", "INACTIVE"]);

    let listing = docs.generate(&status).unwrap().join_with_affixes(", ", "Status: ", ".");
    assert_eq!(
        listing,
        "Status: status\n\nACTIVE : Currently active + \nINACTIVE : No longer active."
    );
}

#[test]
fn fluent_chain_to_snippets() {
    let docs = RestDocs::builder().message_source(account_messages()).build();

    let response = docs
        .generate_with(Some("[]."), &account(), &[])
        .unwrap()
        .add_all([Descriptor::builder("links")
            .prefix(Some("[]."))
            .ty(JsonFieldType::Array)
            .description("Hypermedia links")
            .build()])
        .ignore(["links"])
        .optional(["status"])
        .response_fields();

    let summary: Vec<(&str, bool, bool)> = response
        .descriptors()
        .iter()
        .map(|f| (f.path.as_str(), f.optional, f.ignored))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("[].id", true, false),
            ("[].status", true, false),
            ("[].links", false, true),
        ]
    );
}

#[test]
fn merge_laws() {
    let docs = RestDocs::default();
    let target = docs.generate(&account()).unwrap().into_list();
    let source = vec![Descriptor::new("id", "Overridden id"), Descriptor::new("extra", "Extra")];

    let merged = merge(&target, &source);
    let names: Vec<&str> = merged.iter().map(Descriptor::name).collect();
    assert_eq!(names, vec!["id", "status", "extra"]);
    assert_eq!(merged[0], source[0]);

    assert_eq!(merge(&target, &[]), target);
}

#[test]
fn generation_is_idempotent() {
    let docs = RestDocs::builder().message_source(account_messages()).build();
    let first = docs.generate(&account()).unwrap().into_list();
    let second = docs.generate(&account()).unwrap().into_list();
    assert_eq!(first, second);
}

#[test]
fn resolve_expression_contract() {
    let docs = RestDocs::builder()
        .message_source(StaticMessageSource::new().message("foo.bar", "Foo bar"))
        .build();
    let messages = docs.messages();

    assert_eq!(messages.resolve_expression(Some("{foo.bar}"), "default"), "Foo bar");
    assert_eq!(messages.resolve_expression(Some("{foo.baz}"), "default"), "default");
    assert_eq!(messages.resolve_expression(Some("plain text"), "default"), "plain text");
    assert_eq!(messages.resolve_expression(None, "default"), "default");
}

#[test]
fn manual_params_and_headers() {
    let docs = RestDocs::builder()
        .message_source(StaticMessageSource::new().message("param.page", "Page number"))
        .build();

    let query = docs
        .params()
        .add("page", "{param.page}")
        .unwrap()
        .add_typed_optional("size", "Page size", JsonFieldType::Number, true)
        .unwrap()
        .query_parameters();
    assert_eq!(query.descriptors()[0].description.as_deref(), Some("Page number"));
    assert!(query.descriptors()[1].optional);

    let err = docs.headers().add(" ", "blank").unwrap_err();
    assert!(matches!(err, Error::InvalidName { kind: "headerName" }));
}

#[test]
fn manual_operator_cannot_add_shapes() {
    let docs = RestDocs::default();
    let err = docs
        .descriptors()
        .generate()
        .add_all_shape(None, &account(), &[])
        .unwrap_err();
    assert!(matches!(err, Error::GeneratorUnavailable));
}

#[test]
fn catalog_config_and_bundles() {
    let dir = std::env::temp_dir().join(format!("restdocs-easy-pipeline-{}", std::process::id()));
    let i18n = dir.join("i18n");
    std::fs::create_dir_all(&i18n).unwrap();

    std::fs::write(
        dir.join("shapes.yaml"),
        indoc::indoc! {"
            shapes:
              - name: com.example.Status
                kind: enum
                constants: [ACTIVE, INACTIVE]
              - name: com.example.Order
                fields:
                  - name: total
                    type: Money
                  - name: status
                    type: com.example.Status
                  - name: note
                    type: String
                    annotations:
                      - name: Size
                        attributes: { max: 200 }
        "},
    )
    .unwrap();
    std::fs::write(
        dir.join("restdocs.yaml"),
        indoc::indoc! {"
            locale: ko-KR
            messages:
              directory: i18n
            type_mappings:
              Money: NUMBER
        "},
    )
    .unwrap();
    std::fs::write(
        i18n.join("messages.yaml"),
        indoc::indoc! {"
            com:
              example:
                Order:
                  total: Total amount
                  status: Order status
                Status:
                  ACTIVE: Active
        "},
    )
    .unwrap();
    std::fs::write(
        i18n.join("messages_ko.yaml"),
        "com.example.Order.total: 총액\n",
    )
    .unwrap();

    let catalog = ShapeCatalog::load(&dir.join("shapes.yaml")).unwrap();
    let config = DocsConfig::load(&dir.join("restdocs.yaml")).unwrap();
    let docs = RestDocs::builder().with_config(&config).unwrap().build();
    let order = catalog.get("Order").unwrap();

    let fields = docs.generate(order).unwrap().to_field();
    std::fs::remove_dir_all(&dir).ok();

    let summary: Vec<(&str, JsonFieldType, Option<&str>)> = fields
        .iter()
        .map(|f| (f.path.as_str(), f.ty, f.description.as_deref()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("total", JsonFieldType::Number, Some("총액")),
            (
                "status",
                JsonFieldType::String,
                Some("Order status\n\nACTIVE : Active + \nINACTIVE")
            ),
            ("note", JsonFieldType::String, Some("note")),
        ]
    );
    assert_eq!(
        fields[2].attributes[0].value(),
        "Size must be between 0 and 200 inclusive"
    );
}

#[test]
fn bundle_source_can_be_used_directly() {
    let mut bundle = BundleMessageSource::default();
    bundle
        .add_yaml(&Locale::root(), "com.example.Account.id: Account id\n")
        .unwrap();

    let docs = RestDocs::builder().message_source(bundle).build();
    let fields = docs.generate(&account()).unwrap().filter(["id"]).to_field();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].description.as_deref(), Some("Account id"));
}
