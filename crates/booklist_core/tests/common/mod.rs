use booklist_core::Book;

pub fn book(id: u64, title: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: format!("author {id}"),
        url: format!("https://example.com/{id}"),
        num_comments: 0,
        points: 0,
    }
}

pub fn react_and_redux() -> Vec<Book> {
    vec![
        Book {
            id: 0,
            title: "React".to_string(),
            author: "Jordan Walke".to_string(),
            url: "https://reactjs.org/".to_string(),
            num_comments: 3,
            points: 4,
        },
        Book {
            id: 1,
            title: "Redux".to_string(),
            author: "Dan Abramov, Andrew Clark".to_string(),
            url: "https://redux.js.org/".to_string(),
            num_comments: 2,
            points: 5,
        },
    ]
}
