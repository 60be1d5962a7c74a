use credit_desk::{records_from, Record};
use serde_json::json;

/// One page of credits as the query layer returns them.
pub fn first_batch() -> Vec<Record> {
    records_from(json!([
        {
            "id": 1,
            "numeroCredito": "123456",
            "numeroNfse": "7891011",
            "tipoCredito": "ISSQN",
            "status": "EM_ANALISE",
            "valorIssqn": 1500.75,
            "dataConstituicao": "2024-02-25"
        },
        {
            "id": 2,
            "numeroCredito": "654321",
            "numeroNfse": "1122334",
            "tipoCredito": "Outros",
            "status": "Aprovado",
            "valorIssqn": 320,
            "dataConstituicao": "2024-01-10"
        },
        {
            "id": 3,
            "numeroCredito": "789012",
            "numeroNfse": "5566778",
            "tipoCredito": "ISSQN",
            "situacaoCredito": { "codigo": 4, "descricao": "Reprovado" },
            "valorIssqn": "99.90",
            "dataConstituicao": "2024-03-02T14:00:00Z"
        }
    ]))
}

/// A later page overlapping the first one, from a newer API version.
pub fn second_batch() -> Vec<Record> {
    records_from(json!([
        {
            "id": 2,
            "numeroCredito": "654321",
            "status": "REPROVADO"
        },
        {
            "id": 4,
            "numeroCredito": "111111",
            "numeroNfse": "9990001",
            "tipoCredito": "Restituição",
            "auditoria": {
                "eventos": [
                    { "tipo": "criacao", "texto": "Constituído" }
                ]
            },
            "valorIssqn": 45
        },
        {
            "id": 5,
            "numeroCredito": "222222",
            "numeroNfse": "9990002",
            "tipoCredito": "ISSQN",
            "statusAtual": "Em análise",
            "valorIssqn": 800,
            "dataConstituicao": "15/02/2024"
        }
    ]))
}
