mod category;
mod id;
mod name;
mod price;
mod tags;

pub use self::{category::*, id::*, name::*, price::*, tags::*};
use crate::entity::{Document, Patchable, Slug};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    id: CourseId,
    name: CourseName,
    slug: Slug,
    category: CourseCategory,
    author: Option<String>,
    tags: CourseTags,
    is_published: bool,
    price: CoursePrice,
}

impl Course {
    pub fn new(
        id: CourseId,
        name: CourseName,
        category: CourseCategory,
        author: Option<String>,
        tags: CourseTags,
        is_published: bool,
        price: CoursePrice,
    ) -> Self {
        Self {
            id,
            slug: Slug::from_text(name.as_ref()),
            name,
            category,
            author,
            tags,
            is_published,
            price,
        }
    }
}

impl Document for Course {
    type Id = CourseId;
    const COLLECTION: &'static str = "courses";

    fn document_id(&self) -> &Self::Id {
        &self.id
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![format!("name:{}", self.name.as_ref().to_lowercase())]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub name: Option<CourseName>,
    pub category: Option<CourseCategory>,
    pub author: Option<String>,
    pub tags: Option<CourseTags>,
    pub is_published: Option<bool>,
    pub price: Option<CoursePrice>,
}

impl Patchable for Course {
    type Patch = CoursePatch;

    fn patch(&mut self, patch: Self::Patch) -> Vec<&'static str> {
        let mut written = Vec::new();
        if let Some(name) = patch.name {
            self.slug = Slug::from_text(name.as_ref());
            self.name = name;
            written.extend(["name", "slug"]);
        }
        if let Some(category) = patch.category {
            self.category = category;
            written.push("category");
        }
        if let Some(author) = patch.author {
            self.author = Some(author);
            written.push("author");
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
            written.push("tags");
        }
        if let Some(is_published) = patch.is_published {
            self.is_published = is_published;
            written.push("isPublished");
        }
        if let Some(price) = patch.price {
            self.price = price;
            written.push("price");
        }
        written
    }
}
