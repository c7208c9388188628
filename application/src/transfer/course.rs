use kernel::prelude::entity::{
    Course, CourseCategory, CourseId, CourseName, CoursePatch, CoursePrice, CourseTags,
};
use kernel::KernelError;

use crate::transfer::{DocumentChanges, DocumentDraft};

#[derive(Debug, Clone)]
pub struct CreateCourseDto {
    pub name: String,
    pub category: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub is_published: Option<bool>,
    pub price: f64,
}

impl DocumentDraft for CreateCourseDto {
    type Document = Course;

    fn into_document(self, id: CourseId) -> error_stack::Result<Course, KernelError> {
        Ok(Course::new(
            id,
            CourseName::new(self.name)?,
            self.category.parse::<CourseCategory>()?,
            self.author,
            CourseTags::new(self.tags)?,
            self.is_published.unwrap_or(false),
            CoursePrice::new(self.price)?,
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCourseDto {
    pub name: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
    pub price: Option<f64>,
}

impl DocumentChanges for UpdateCourseDto {
    type Document = Course;

    fn into_patch(self) -> error_stack::Result<CoursePatch, KernelError> {
        Ok(CoursePatch {
            name: self.name.map(CourseName::new).transpose()?,
            category: self
                .category
                .map(|category| category.parse::<CourseCategory>())
                .transpose()?,
            author: self.author,
            tags: self.tags.map(CourseTags::new).transpose()?,
            is_published: self.is_published,
            price: self.price.map(CoursePrice::new).transpose()?,
        })
    }
}
