use super::id::AuthorId;

/// 著者。`id` は永続化されるまで `None`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    id: Option<AuthorId>,
    pub name: String,
    pub age: i32,
    pub description: String,
    pub image: String,
}

/// 著者の部分更新リクエスト（Noneのフィールドは変更しない）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorUpdateRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// 書籍側から見た著者の縮約ビュー（age / description を持たない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSummary {
    pub id: Option<AuthorId>,
    pub name: String,
    pub image: String,
}

impl Author {
    pub fn new(
        name: impl Into<String>,
        age: i32,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            age,
            description: description.into(),
            image: image.into(),
        }
    }

    pub fn id(&self) -> Option<AuthorId> {
        self.id
    }

    /// IDを付与（または差し替え）したコピーを返す。
    pub fn with_id(self, id: AuthorId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    /// パッチをフィールド単位でマージする。`id` は変わらない。
    pub fn apply_update(self, patch: AuthorUpdateRequest) -> Self {
        Self {
            id: self.id,
            name: patch.name.unwrap_or(self.name),
            age: patch.age.unwrap_or(self.age),
            description: patch.description.unwrap_or(self.description),
            image: patch.image.unwrap_or(self.image),
        }
    }
}
