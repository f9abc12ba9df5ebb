pub mod lesson_plan;
