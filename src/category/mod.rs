//! 카테고리 및 분류 체계(taxonomy)
//! taxonomy 는 하위 카테고리와 속성 이름을 가진 트리 구조로 JSONB 컬럼에 저장된다.

// region:    --- Imports
use crate::error::AdminError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// endregion: --- Imports

// region:    --- Category Model
/// 카테고리 모델 (`categories` 테이블)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub title: String,
    #[sqlx(json)]
    pub taxonomy: Vec<TaxonomyNode>,
}

/// 분류 트리 노드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyNode {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub subcategories: Vec<TaxonomyNode>,
}

/// 카테고리 생성/수정 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub title: String,
    #[serde(default)]
    pub taxonomy: Vec<TaxonomyNode>,
}

// endregion: --- Category Model

// region:    --- Validation
pub const MAX_TAXONOMY_DEPTH: usize = 8;

impl CategoryInput {
    /// 제목과 taxonomy 검증 후 정리된 입력 반환
    pub fn validated(self) -> Result<Self, AdminError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AdminError::Validation("category title is required".into()));
        }
        validate_taxonomy(&self.taxonomy)?;
        Ok(Self {
            title,
            taxonomy: self.taxonomy,
        })
    }
}

/// 분류 트리 검증
/// - 노드/속성 이름은 공백이 아니어야 한다
/// - 같은 부모 아래 노드 이름은 대소문자 구분 없이 중복될 수 없다
/// - 깊이는 MAX_TAXONOMY_DEPTH 이하
pub fn validate_taxonomy(nodes: &[TaxonomyNode]) -> Result<(), AdminError> {
    validate_level(nodes, 1, "")
}

fn validate_level(nodes: &[TaxonomyNode], depth: usize, path: &str) -> Result<(), AdminError> {
    if nodes.is_empty() {
        return Ok(());
    }
    if depth > MAX_TAXONOMY_DEPTH {
        return Err(AdminError::Validation(format!(
            "taxonomy deeper than {} levels at '{}'",
            MAX_TAXONOMY_DEPTH, path
        )));
    }

    let mut seen = HashSet::new();
    for node in nodes {
        let name = node.name.trim();
        if name.is_empty() {
            return Err(AdminError::Validation(format!(
                "empty taxonomy node name under '{}'",
                path
            )));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(AdminError::Validation(format!(
                "duplicate taxonomy node '{}' under '{}'",
                name, path
            )));
        }
        let node_path = if path.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", path, name)
        };
        if node.attributes.iter().any(|a| a.trim().is_empty()) {
            return Err(AdminError::Validation(format!(
                "empty attribute name in '{}'",
                node_path
            )));
        }
        validate_level(&node.subcategories, depth + 1, &node_path)?;
    }
    Ok(())
}

/// 트리 전체 노드 수
pub fn count_nodes(nodes: &[TaxonomyNode]) -> usize {
    nodes
        .iter()
        .map(|n| 1 + count_nodes(&n.subcategories))
        .sum()
}

// endregion: --- Validation
