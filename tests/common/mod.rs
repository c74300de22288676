//! Common test utilities

#![allow(dead_code)]

/// Listing page with the headline block and the list that follows it
///
/// A third list is appended whose links must never be picked up.
pub fn listing_page(headline: &[&str], following: &[&str]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="euc-kr"><title>뉴스 목록</title></head>
<body>
<div class="list_body newsflash_body">
<ul class="type06_headline">
{}
</ul>
<ul class="type06">
{}
</ul>
</div>
<div class="paging"><strong>1</strong><a href="?page=2">2</a></div>
<ul class="type02"><li><dl><dt><a href="https://news.naver.com/unrelated">다른 목록</a></dt></dl></li></ul>
</body>
</html>"#,
        headline.iter().map(|href| list_item(href)).collect::<String>(),
        following.iter().map(|href| list_item(href)).collect::<String>()
    )
}

/// One listing item: thumbnail `dt.photo` plus the bare `dt` title link
pub fn list_item(href: &str) -> String {
    format!(
        r#"<li>
<dl>
<dt class="photo"><a href="{href}"><img src="https://imgnews.pstatic.net/thumb.jpg" alt=""></a></dt>
<dt><a href="{href}">기사 제목입니다</a></dt>
<dd><span class="lede">기사 요약입니다…</span><span class="writing">언론사</span></dd>
</dl>
</li>
"#
    )
}

/// Article page whose body container holds `body`
pub fn article_page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head><meta charset="utf-8"><title>기사</title></head>
<body>
<div id="ct">
<h2 class="media_end_head_headline">기사 제목</h2>
<div id="dic_area" class="go_trans _article_content">
{body}
</div>
</div>
</body>
</html>"#
    )
}

/// Article page without any body container
pub fn page_without_body() -> String {
    r#"<html><body><div class="error_msg">요청하신 페이지를 찾을 수 없습니다.</div></body></html>"#
        .to_string()
}

/// A realistic wire-copy body with byline, photo caption and trailer
pub fn wire_copy_body() -> &'static str {
    r#"(서울=연합뉴스) 홍길동 기자 = 한국은행이 기준금리를 동결했다.<br>
<span class="end_photo_org"><img src="photo.jpg"><em class="img_desc">한국은행 전경 [연합뉴스 자료사진]</em></span><br>
한은은 물가 상승세가 둔화하고 있다고 밝혔다.<br>
<br>
시장에서는 연내 인하 가능성을 점치고 있다.<br>
gildong@yna.co.kr<br>
무단 전재 및 재배포 금지"#
}
