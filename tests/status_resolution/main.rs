//! Integration tests for status resolution over payloads from different API versions.

use credit_desk::{
    normalize_text, ResolverConfig, StatusCode, StatusResolver, DEFAULT_DISPLAY_CLASS,
    DEFAULT_LABEL,
};
use serde_json::{json, Value};

#[test]
fn bare_strings_are_trimmed_verbatim() {
    let resolver = StatusResolver::new();
    for s in ["", "  ", "Aprovado", " em análise\t", "qualquer texto ", "\nREPROVADO\n"] {
        assert_eq!(resolver.resolve(s), s.trim());
        assert_eq!(resolver.resolve(&Value::String(s.to_string())), s.trim());
    }
}

#[test]
fn direct_status_field_skips_nested_data() {
    let resolver = StatusResolver::new();
    let payload = json!({
        "status": "  Constituído ",
        "historico": [
            { "situacao": "REPROVADO" },
            { "situacao": { "descricao": "Aprovado" } }
        ]
    });
    assert_eq!(resolver.resolve(&payload), "Constituído");
}

#[test]
fn every_api_version_shape() {
    let resolver = StatusResolver::new();
    let payloads = [
        (json!({ "situacao": "Aprovado" }), StatusCode::Aprovado),
        (json!({ "situacaoAtual": { "label": "Em análise" } }), StatusCode::EmAnalise),
        (json!({ "statusCredito": { "name": "REPROVADO" } }), StatusCode::Reprovado),
        (json!({ "statusAtual": { "value": "constituido" } }), StatusCode::Constituido),
        (json!({ "status": { "text": "Aprovado" } }), StatusCode::Aprovado),
        (json!({ "dados": { "situacao": { "texto": "Reprovado" } } }), StatusCode::Reprovado),
        (json!({ "numeroCredito": "C-1" }), StatusCode::Unknown),
    ];

    for (payload, expected) in payloads {
        let raw = resolver.resolve(&payload);
        assert_eq!(resolver.normalize(&raw), expected, "payload {}", payload);
    }
}

#[test]
fn depth_cap_applies_to_deep_search() {
    let resolver = StatusResolver::new();

    let three_down = json!({
        "auditoria": [ { "evento": "Crédito aprovado pelo fiscal" } ]
    });
    assert_eq!(resolver.resolve(&three_down), "Crédito aprovado pelo fiscal");

    let five_down = json!({
        "a": [ { "b": [ { "c": "Aprovado" } ] } ]
    });
    assert_eq!(resolver.resolve(&five_down), "");
}

#[test]
fn closed_set_round_trips() {
    let resolver = StatusResolver::new();
    for code in StatusCode::ALL {
        assert_eq!(resolver.normalize(code.as_str()), code);
        assert_eq!(resolver.normalize(&normalize_text(code.label())), code);
        assert_eq!(resolver.label(code), code.label());
    }
}

#[test]
fn misses_degrade_to_defaults() {
    let resolver = StatusResolver::new();
    assert_eq!(resolver.normalize(""), StatusCode::Unknown);
    assert_eq!(resolver.normalize_value(None), StatusCode::Unknown);
    assert_eq!(resolver.normalize_value(Some(&Value::Null)), StatusCode::Unknown);
    assert_eq!(resolver.label("Cancelado"), DEFAULT_LABEL);
    assert_eq!(resolver.display_class(StatusCode::Unknown), DEFAULT_DISPLAY_CLASS);
    assert_eq!(resolver.display_label("Cancelado"), "Cancelado");
}

#[test]
fn resolver_config_loads_from_json() {
    let config: ResolverConfig = serde_json::from_value(json!({
        "candidate_fields": ["estado"],
        "max_depth": 1
    }))
    .unwrap();
    assert_eq!(config.text_fields, ResolverConfig::default().text_fields);

    let resolver = StatusResolver::with_config(config);
    assert_eq!(resolver.resolve(&json!({ "estado": "Aprovado", "status": "x" })), "Aprovado");
    assert_eq!(resolver.resolve(&json!({ "a": { "b": "Aprovado" } })), "");
    assert_eq!(resolver.resolve(&json!({ "a": "Reprovado" })), "Reprovado");
}
