//! 预导入模块，方便使用

pub use super::attendances::{
    ActiveModel as AttendanceActiveModel, Entity as Attendances, Model as AttendanceModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::faculties::{
    ActiveModel as FacultyActiveModel, Entity as Faculties, Model as FacultyModel,
};
pub use super::faculty_subjects::{
    ActiveModel as FacultySubjectActiveModel, Entity as FacultySubjects,
    Model as FacultySubjectModel,
};
pub use super::marks::{ActiveModel as MarksActiveModel, Entity as Marks, Model as MarksModel};
pub use super::sessions::{
    ActiveModel as SessionActiveModel, Entity as Sessions, Model as SessionModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
